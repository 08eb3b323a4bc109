//! Test fixture: validated field with a type that cannot be read from a request.

#[derive(Default)]
pub struct Params {
    /// apivalidator: required
    pub login: String,
    /// apivalidator: min=0
    pub ratio: f32,
}

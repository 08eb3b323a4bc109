//! Test fixture: the same url routed twice on one receiver.

pub struct Api;

#[derive(Default)]
pub struct Params {
    /// apivalidator: required
    pub id: u64,
}

impl Api {
    /// apigen:api {"url": "/item"}
    pub fn first(&self, params: Params) -> Result<u64, ApiError> {
        Ok(params.id)
    }

    /// apigen:api {"url": "/item", "method": "GET"}
    pub fn second(&self, params: Params) -> Result<u64, ApiError> {
        Ok(params.id + 1)
    }
}

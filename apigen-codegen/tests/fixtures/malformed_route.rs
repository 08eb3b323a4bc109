//! Test fixture: routing payload that is not valid JSON.

pub struct Api;

impl Api {
    /// apigen:api {"url": "/broken", "auth": tru}
    pub fn broken(&self) -> Result<(), ApiError> {
        Ok(())
    }
}

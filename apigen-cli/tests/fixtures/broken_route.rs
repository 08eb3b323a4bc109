//! Test fixture: a routing payload that is not JSON.

pub struct ShopApi;

impl ShopApi {
    /// apigen:api {url: /shop/order}
    pub fn order(&self) -> Result<u64, apigen::ApiError> {
        Ok(1)
    }
}

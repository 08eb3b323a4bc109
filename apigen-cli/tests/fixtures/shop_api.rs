//! Test fixture: a small definition file for the CLI.

use apigen::{ApiError, Context};

pub struct ShopApi;

#[derive(Default)]
pub struct OrderParams {
    /// apivalidator: required,min=2
    pub item: String,
    /// apivalidator: min=1,max=99,default=1
    pub quantity: u8,
}

impl ShopApi {
    /// apigen:api {"url": "/shop/order", "auth": true, "method": "POST"}
    pub fn order(&self, ctx: Context, params: OrderParams) -> Result<u64, ApiError> {
        Ok(params.quantity as u64)
    }
}

//! Test fixture: two receivers sharing a url, with validated parameters.

use apigen::{ApiError, Context};

pub struct MyApi;

pub struct OtherApi;

#[derive(Default)]
pub struct ProfileParams {
    /// apivalidator: required
    pub login: String,
}

#[derive(Default)]
pub struct CreateParams {
    /// apivalidator: required,min=10
    pub login: String,
    /// apivalidator: paramname=full_name
    pub name: String,
    /// apivalidator: enum=user|moderator|admin,default=user
    pub status: String,
    /// apivalidator: min=0,max=128
    pub age: i32,
}

#[derive(Default)]
pub struct OtherCreateParams {
    /// apivalidator: required,min=3
    pub username: String,
    /// apivalidator: paramname=account_name
    pub name: String,
    /// apivalidator: enum=warrior|sorcerer|rouge,default=warrior
    pub class: String,
    /// apivalidator: min=1,max=50
    pub level: i32,
}

impl MyApi {
    /// apigen:api {"url": "/user/profile", "auth": false}
    pub fn profile(&self, ctx: Context, params: ProfileParams) -> Result<User, ApiError> {
        unimplemented!()
    }

    /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
    pub fn create(&self, ctx: Context, params: CreateParams) -> Result<NewUser, ApiError> {
        unimplemented!()
    }
}

impl OtherApi {
    /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
    pub fn create(&self, ctx: Context, params: OtherCreateParams) -> Result<OtherUser, ApiError> {
        unimplemented!()
    }
}

//! Messages of the `auth.Auth` service used by this crate.

/// Request for `auth.Auth/IsAdmin`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IsAdminRequest {
    #[prost(string, tag = "1")]
    pub user_id: ::prost::alloc::string::String,
}

/// Response of `auth.Auth/IsAdmin`
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct IsAdminResponse {
    #[prost(bool, tag = "1")]
    pub is_admin: bool,
}

pub const IS_ADMIN_PATH: &str = "/auth.Auth/IsAdmin";

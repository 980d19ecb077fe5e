//! Request/response DTOs for the REST API.

pub mod scan_dto;
pub mod user_dto;

pub use scan_dto::{
    CreateScanTypeRequest, ScanIdQuery, ScanRequest, ScanResponse, ScanTypeEnvelope,
};
pub use user_dto::{
    RegisterUserRequest, ScannedUserDto, UserInfoQuery, UserInfoResponse, UserProfileDto,
};

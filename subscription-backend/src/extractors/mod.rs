pub mod request_id;
pub mod uuid;

pub use self::request_id::RequestId;
pub use self::uuid::ValidatedUuid;

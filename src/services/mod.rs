// 服务层
//
// 联系人存储、表单校验、会话管理

pub mod contact_store;
pub mod session;
pub mod validation;

pub use contact_store::{ContactStore, JsonContactStore, MemoryContactStore};
pub use session::{SessionHandle, SessionManager};
pub use validation::FieldError;

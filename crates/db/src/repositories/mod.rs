//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod admin_user_repo;
pub mod category_repo;
pub mod dashboard_repo;
pub mod project_repo;
pub mod session_repo;
pub mod subcategory_repo;

pub use admin_user_repo::AdminUserRepo;
pub use category_repo::CategoryRepo;
pub use dashboard_repo::DashboardRepo;
pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use subcategory_repo::SubcategoryRepo;

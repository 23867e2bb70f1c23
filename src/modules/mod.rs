pub mod admin;
pub mod courses;
pub mod governance;
pub mod results;
pub mod sessions;
pub mod staff;
pub mod students;

pub use self::admin::AdminService;
pub use self::courses::CourseService;
pub use self::governance::GovernanceService;
pub use self::results::ResultService;
pub use self::sessions::SessionService;
pub use self::staff::StaffService;
pub use self::students::StudentService;

mod common;
pub use self::common::{Query, RequestBody};

mod launch_list;
pub use self::launch_list::LaunchListQuery;

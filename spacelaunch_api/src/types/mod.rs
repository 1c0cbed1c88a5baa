mod graphql;
pub use self::graphql::{ErrorLocation, GraphQlError, GraphQlResponse};

mod launch;
pub use self::launch::{Launch, LaunchConnection, LaunchListData, Mission};

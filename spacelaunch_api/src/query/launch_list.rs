use serde_json::{Map, Value};

use super::Query;

const LAUNCH_LIST_DOCUMENT: &str = r#"query LaunchList($cursor: String, $pageSize: Int) {
  launches(after: $cursor, pageSize: $pageSize) {
    __typename
    cursor
    hasMore
    launches {
      __typename
      id
      site
      mission {
        __typename
        name
        missionPatch(size: SMALL)
      }
    }
  }
}"#;

/// One page request of the launch list, continuing after `cursor`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LaunchListQuery {
    /// Continuation token from the previous page. `None` starts from the beginning.
    pub cursor: Option<String>,
    /// Results per page. `None` uses the server default.
    pub page_size: Option<u32>,
}

impl Query for LaunchListQuery {
    fn operation_name(&self) -> &'static str {
        "LaunchList"
    }

    fn document(&self) -> &'static str {
        LAUNCH_LIST_DOCUMENT
    }

    fn variables(&self) -> Value {
        let mut vars = Map::new();
        vars.insert(
            "cursor".to_string(),
            match &self.cursor {
                Some(cursor) => Value::String(cursor.clone()),
                None => Value::Null,
            },
        );
        if let Some(page_size) = self.page_size {
            vars.insert("pageSize".to_string(), Value::from(page_size));
        }
        Value::Object(vars)
    }
}

impl LaunchListQuery {
    pub fn with_cursor(mut self, cursor: Option<&str>) -> Self {
        self.cursor = cursor.map(str::to_string);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

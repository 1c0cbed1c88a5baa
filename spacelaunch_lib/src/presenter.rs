//! Scroll-driven presentation of the launch list.

use std::ops::Range;

use serde::Serialize;
use spacelaunch_api::types::Launch;
use tokio::sync::watch;

use crate::pagination::{Applied, PageSource, PaginationController};
use crate::thumbnail::parse_image_url;

/// Scroll geometry of the list surface, in the same unit throughout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub content_height: f64,
    pub offset: f64,
    pub height: f64,
}

impl Viewport {
    /// Distance from the top of the viewport to the end of the content.
    pub fn remaining(&self) -> f64 {
        self.content_height - self.offset
    }

    pub fn is_near_end(&self) -> bool {
        is_near_end(self.content_height, self.offset, self.height)
    }
}

/// True once less than one viewport height of content is left below the offset.
pub fn is_near_end(content_height: f64, offset: f64, viewport_height: f64) -> bool {
    content_height - offset < viewport_height
}

/// Display data for one list row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListRow {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Only set when the item carries a loadable http(s) URL.
    pub thumbnail_url: Option<String>,
}

/// Items that can be shown as a list row.
pub trait ToListRow {
    fn to_list_row(&self) -> ListRow;
}

impl ToListRow for Launch {
    fn to_list_row(&self) -> ListRow {
        ListRow {
            id: self.id.clone(),
            title: self.mission_name().map(str::to_string),
            description: self.site.clone(),
            thumbnail_url: self
                .mission_patch()
                .and_then(|url| parse_image_url(url).ok())
                .map(|url| url.to_string()),
        }
    }
}

/// A fixed-row-height list backed by a [`PaginationController`].
///
/// Scroll updates are fed in with [`on_scroll`](Self::on_scroll); the
/// presenter asks the controller for more data when the viewport nears the
/// end, and [`take_refresh`](Self::take_refresh) reports whether rows need
/// to be re-read.
pub struct ListPresenter<S: PageSource> {
    controller: PaginationController<S>,
    changes: watch::Receiver<u64>,
    row_height: f64,
}

impl<S> ListPresenter<S>
where
    S: PageSource,
    S::Item: ToListRow,
{
    pub fn new(controller: PaginationController<S>, row_height: f64) -> Self {
        let changes = controller.subscribe();
        Self {
            controller,
            changes,
            row_height,
        }
    }

    /// Handles a scroll position update. Returns whether a fetch was started.
    pub fn on_scroll(&mut self, offset: f64, viewport_height: f64) -> bool {
        let viewport = self.viewport(offset, viewport_height);
        if viewport.is_near_end() {
            self.on_near_end_of_content()
        } else {
            false
        }
    }

    pub fn on_near_end_of_content(&mut self) -> bool {
        self.controller.request_more_if_needed()
    }

    /// Waits for the outstanding fetch, if any, to be applied.
    pub async fn settle(&mut self) -> Option<Applied> {
        self.controller.next_completion().await
    }

    /// Consumes the data-changed signal. True when rows must be re-read.
    pub fn take_refresh(&mut self) -> bool {
        match self.changes.has_changed() {
            Ok(true) => {
                self.changes.borrow_and_update();
                true
            }
            _ => false,
        }
    }

    pub fn viewport(&self, offset: f64, viewport_height: f64) -> Viewport {
        Viewport {
            content_height: self.content_height(),
            offset,
            height: viewport_height,
        }
    }

    pub fn content_height(&self) -> f64 {
        self.row_count() as f64 * self.row_height
    }

    pub fn row_count(&self) -> usize {
        self.controller.current_items().len()
    }

    pub fn row(&self, index: usize) -> Option<ListRow> {
        self.controller
            .current_items()
            .get(index)
            .map(ToListRow::to_list_row)
    }

    pub fn rows(&self) -> Vec<ListRow> {
        self.controller
            .current_items()
            .iter()
            .map(ToListRow::to_list_row)
            .collect()
    }

    /// Indices of the rows at least partly inside the viewport.
    pub fn visible_range(&self, offset: f64, viewport_height: f64) -> Range<usize> {
        if self.row_height <= 0.0 {
            return 0..0;
        }
        let count = self.row_count();
        let first = (offset.max(0.0) / self.row_height).floor() as usize;
        let last = ((offset.max(0.0) + viewport_height) / self.row_height).ceil() as usize;
        first.min(count)..last.min(count)
    }

    pub fn is_loading(&self) -> bool {
        self.controller.is_loading()
    }

    pub fn has_more(&self) -> bool {
        self.controller.state().has_more()
    }

    pub fn controller(&self) -> &PaginationController<S> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PaginationController<S> {
        &mut self.controller
    }

    /// Tears the screen down, abandoning any outstanding fetch.
    pub fn dispose(&mut self) {
        self.controller.dispose();
    }
}

//! Pagination query parsing helpers.

use salvo::oapi::extract::QueryParam;

use stylus_app::domain::pagination::Page;

/// Turn optional `limit` / `offset` query parameters into a [`Page`].
pub(crate) trait PaginationExt {
    fn into_page(self) -> Page;
}

impl PaginationExt for (QueryParam<u32, false>, QueryParam<u32, false>) {
    fn into_page(self) -> Page {
        let (limit, offset) = self;

        Page::new(limit.into_inner(), offset.into_inner())
    }
}

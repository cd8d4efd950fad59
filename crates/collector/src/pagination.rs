//! Page-number pagination over the REST listings, exposed as a lazy stream of
//! items. A page is only requested once the previous one has been consumed.

use std::future::Future;

use common::{AppError, Result};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};

struct PageState<F> {
    next_page: Option<u32>,
    fetch_page: F,
}

async fn next_page<T, F, Fut>(
    mut state: PageState<F>,
    per_page: u32,
) -> Result<Option<(Vec<T>, PageState<F>)>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let Some(page) = state.next_page else {
        return Ok(None);
    };
    let items = (state.fetch_page)(page).await?;
    // A short page is the last one.
    state.next_page = if items.len() < per_page as usize {
        None
    } else {
        Some(page + 1)
    };
    Ok(Some((items, state)))
}

/// Walks pages starting at 1 until a page shorter than `per_page` arrives.
pub fn paginate<T, F, Fut>(per_page: u32, fetch_page: F) -> BoxStream<'static, Result<T>>
where
    T: Send + 'static,
    F: FnMut(u32) -> Fut + Send + 'static,
    Fut: Future<Output = Result<Vec<T>>> + Send + 'static,
{
    let per_page = per_page.max(1);
    let state = PageState {
        next_page: Some(1),
        fetch_page,
    };
    stream::try_unfold(state, move |state| next_page(state, per_page))
        .map_ok(|items| stream::iter(items.into_iter().map(Ok::<T, AppError>)))
        .try_flatten()
        .boxed()
}

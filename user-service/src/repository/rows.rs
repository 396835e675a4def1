//! Generic row mapping over result streams

use futures::{Stream, TryStreamExt};

/// Decode every row of a result stream with `decode`, preserving order
///
/// The stream is consumed by value, so the underlying cursor is dropped on
/// every exit path. The first stream or decode error aborts the call and the
/// rows decoded so far are discarded. No rows yields an empty `Vec`.
///
/// # Example
///
/// ```rust
/// use futures::stream;
/// use user_service::repository::map_rows;
///
/// # tokio_test_block(async {
/// let rows = stream::iter(vec![Ok::<_, String>(1), Ok(2), Ok(3)]);
/// let doubled = map_rows(rows, |n| Ok(n * 2)).await.unwrap();
/// assert_eq!(doubled, vec![2, 4, 6]);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     futures::executor::block_on(f)
/// # }
/// ```
pub async fn map_rows<S, R, T, E, F>(mut rows: S, mut decode: F) -> Result<Vec<T>, E>
where
    S: Stream<Item = Result<R, E>> + Unpin,
    F: FnMut(&R) -> Result<T, E>,
{
    let mut items = Vec::new();
    while let Some(row) = rows.try_next().await? {
        items.push(decode(&row)?);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use std::pin::Pin;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::task::{Context, Poll};

    use futures::{stream, StreamExt};

    use super::*;

    /// Stream wrapper that records when it is dropped
    struct TrackedCursor<S> {
        inner: S,
        released: Arc<AtomicBool>,
    }

    impl<S> TrackedCursor<S> {
        fn new(inner: S) -> (Self, Arc<AtomicBool>) {
            let released = Arc::new(AtomicBool::new(false));
            (
                Self {
                    inner,
                    released: Arc::clone(&released),
                },
                released,
            )
        }
    }

    impl<S: Stream + Unpin> Stream for TrackedCursor<S> {
        type Item = S::Item;

        fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
            self.inner.poll_next_unpin(cx)
        }
    }

    impl<S> Drop for TrackedCursor<S> {
        fn drop(&mut self) {
            self.released.store(true, Ordering::SeqCst);
        }
    }

    #[derive(Debug, PartialEq)]
    struct Row {
        id: i64,
        name: &'static str,
    }

    fn decode_name(row: &Row) -> Result<String, String> {
        Ok(format!("{}:{}", row.id, row.name))
    }

    #[tokio::test]
    async fn test_zero_rows_is_empty_not_error() {
        let rows = stream::iter(Vec::<Result<Row, String>>::new());
        let result = map_rows(rows, decode_name).await;
        assert_eq!(result, Ok(Vec::new()));
    }

    #[tokio::test]
    async fn test_rows_decoded_in_result_order() {
        let rows = stream::iter(vec![
            Ok(Row { id: 1, name: "Ana" }),
            Ok(Row { id: 2, name: "Anna" }),
            Ok(Row { id: 3, name: "Bob" }),
        ]);
        let result = map_rows(rows, decode_name).await.unwrap();
        assert_eq!(result, vec!["1:Ana", "2:Anna", "3:Bob"]);
    }

    #[tokio::test]
    async fn test_decode_failure_discards_partial_results() {
        let rows = stream::iter(vec![
            Ok(Row { id: 1, name: "Ana" }),
            Ok(Row { id: 2, name: "" }),
            Ok(Row { id: 3, name: "Bob" }),
        ]);
        let mut decoded = 0;
        let result = map_rows(rows, |row| {
            decoded += 1;
            if row.name.is_empty() {
                Err(format!("row {} has no name", row.id))
            } else {
                decode_name(row)
            }
        })
        .await;

        assert_eq!(result, Err("row 2 has no name".to_string()));
        assert_eq!(decoded, 2, "decoding stops at the failing row");
    }

    #[tokio::test]
    async fn test_stream_error_surfaces() {
        let rows = stream::iter(vec![
            Ok(Row { id: 1, name: "Ana" }),
            Err("connection reset".to_string()),
        ]);
        let result = map_rows(rows, decode_name).await;
        assert_eq!(result, Err("connection reset".to_string()));
    }

    #[tokio::test]
    async fn test_cursor_released_on_success() {
        let (cursor, released) =
            TrackedCursor::new(stream::iter(vec![Ok::<_, String>(Row { id: 1, name: "Ana" })]));
        map_rows(cursor, decode_name).await.unwrap();
        assert!(released.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_cursor_released_on_decode_failure() {
        let (cursor, released) = TrackedCursor::new(stream::iter(vec![
            Ok(Row { id: 1, name: "Ana" }),
            Ok(Row { id: 2, name: "Anna" }),
        ]));
        let result: Result<Vec<String>, String> =
            map_rows(cursor, |_| Err("bad row".to_string())).await;

        assert!(result.is_err());
        assert!(released.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_cursor_released_on_stream_error() {
        let (cursor, released) = TrackedCursor::new(stream::iter(vec![Err::<Row, _>(
            "query failed".to_string(),
        )]));
        let result = map_rows(cursor, decode_name).await;

        assert!(result.is_err());
        assert!(released.load(Ordering::SeqCst));
    }
}

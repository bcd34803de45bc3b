//! Adapters between in-memory quad collections and quad streams

use futures::{stream, StreamExt};
use quadfetch_formats::{FormatError, QuadStream};
use quadfetch_graph::{Dataset, Quad};

/// Turn a finite quad sequence into a quad stream
///
/// Elements are yielded in input order, each exactly once, followed by
/// completion.
pub fn to_stream(quads: Vec<Quad>) -> QuadStream {
    Box::pin(stream::iter(quads.into_iter().map(Ok::<_, FormatError>)))
}

/// Drain a quad stream into a dataset
///
/// Quads are inserted in arrival order. A stream error is propagated as-is;
/// quads inserted before the error stay in the dataset.
pub async fn drain(
    dataset: &mut Dataset,
    mut stream: QuadStream,
) -> std::result::Result<(), FormatError> {
    while let Some(quad) = stream.next().await {
        dataset.add(quad?);
    }
    Ok(())
}

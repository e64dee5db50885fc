//! graph6 encoding and decoding (the format emitted by `nauty`'s `geng`).
//!
//! Layout: an order prefix `N(n)` followed by the upper triangle of the
//! adjacency matrix, column by column (`(0,1), (0,2), (1,2), (0,3), ...`),
//! packed six bits per byte, each byte offset by 63. Only orders up to
//! [`MAX_VERTICES`] are accepted.

use crate::graph::{bit, Graph, GraphError, MAX_VERTICES};

/// Optional header some tools write before each graph.
pub const HEADER: &str = ">>graph6<<";

const OFFSET: u8 = 63;
const LONG_ORDER: u8 = 126;

/// Decodes one graph6 string. Surrounding whitespace and a leading
/// [`HEADER`] are ignored.
///
/// # Errors
/// Returns an error for bytes outside `63..=126`, an order above 64, a body
/// of the wrong length, or nonzero padding bits.
pub fn decode(text: &str) -> Result<Graph, GraphError> {
    let text = text.trim();
    let text = text.strip_prefix(HEADER).unwrap_or(text);
    let bytes = text.as_bytes();

    for (offset, &byte) in bytes.iter().enumerate() {
        if !(OFFSET..=LONG_ORDER).contains(&byte) {
            return Err(GraphError::InvalidGraph6Byte { offset, byte });
        }
    }

    let (n, body) = decode_order(bytes)?;
    let pairs = n * n.saturating_sub(1) / 2;
    let expected = pairs.div_ceil(6);
    if body.len() != expected {
        return Err(GraphError::Graph6Length {
            expected,
            got: body.len(),
        });
    }

    let mut adj = vec![0u64; n];
    let mut t = 0usize;
    for j in 1..n {
        for i in 0..j {
            if body_bit(body, t) {
                adj[i] |= bit(j);
                adj[j] |= bit(i);
            }
            t += 1;
        }
    }
    if (pairs..expected * 6).any(|t| body_bit(body, t)) {
        return Err(GraphError::Graph6Padding);
    }

    Graph::from_adj(adj)
}

/// Encodes a graph as graph6, without header or trailing newline.
pub fn encode(graph: &Graph) -> String {
    let n = graph.order();
    let mut out = Vec::with_capacity(4 + (n * n) / 12 + 1);

    if n < usize::from(LONG_ORDER - OFFSET) {
        out.push(OFFSET + n as u8);
    } else {
        out.push(LONG_ORDER);
        for shift in [12, 6, 0] {
            out.push(OFFSET + ((n >> shift) & 0x3f) as u8);
        }
    }

    let mut acc = 0u8;
    let mut filled = 0;
    for j in 1..n {
        for i in 0..j {
            acc = (acc << 1) | u8::from(graph.has_edge(i, j));
            filled += 1;
            if filled == 6 {
                out.push(OFFSET + acc);
                acc = 0;
                filled = 0;
            }
        }
    }
    if filled > 0 {
        out.push(OFFSET + (acc << (6 - filled)));
    }

    out.into_iter().map(char::from).collect()
}

/// Splits the order prefix from the body.
fn decode_order(bytes: &[u8]) -> Result<(usize, &[u8]), GraphError> {
    let Some(&first) = bytes.first() else {
        return Err(GraphError::Graph6Length {
            expected: 1,
            got: 0,
        });
    };
    if first != LONG_ORDER {
        return Ok((usize::from(first - OFFSET), &bytes[1..]));
    }

    // 126 126 x x x x x x encodes orders beyond 258047, far past the bitset limit.
    let (width, digits) = if bytes.get(1) == Some(&LONG_ORDER) {
        (8, 6)
    } else {
        (4, 3)
    };
    if bytes.len() < width {
        return Err(GraphError::Graph6Length {
            expected: width,
            got: bytes.len(),
        });
    }
    let n = bytes[width - digits..width]
        .iter()
        .fold(0usize, |acc, &b| (acc << 6) | usize::from(b - OFFSET));
    if n > MAX_VERTICES {
        return Err(GraphError::TooManyVertices { n });
    }
    Ok((n, &bytes[width..]))
}

#[inline]
fn body_bit(body: &[u8], t: usize) -> bool {
    ((body[t / 6] - OFFSET) >> (5 - t % 6)) & 1 != 0
}

// ============================================================================
// Tests
// ============================================================================

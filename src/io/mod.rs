//! Instance text parsing and result formatting.
//!
//! The instance format is whitespace-separated: the vertex count `N`, then
//! `N-1` pairs of `(destination, demand)`, then a declared edge count, then
//! `(origin, destination, cost)` triples until end of input. Any pair never
//! listed keeps cost `0`, meaning "no direct edge". The declared edge count
//! is informational; the triples themselves drive the parse.

use std::fs::File;
use std::io::Read;
use std::iter::Peekable;
use std::path::Path;
use std::str::SplitWhitespace;

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{CandidateRoute, Graph};

/// Reads and parses an instance file.
pub fn read_instance(path: impl AsRef<Path>) -> Result<Graph> {
    let mut text = String::new();
    File::open(path)?.read_to_string(&mut text)?;
    parse_instance(&text)
}

/// Parses an instance from its text form.
///
/// Malformed input — missing or non-numeric fields, vertex indices outside
/// `0..N`, a trailing partial triple — is a fatal error; nothing is
/// repaired or guessed.
///
/// # Examples
///
/// ```
/// use cvrp_exact::io::parse_instance;
///
/// let graph = parse_instance("3\n1 4\n2 5\n2\n0 1 10\n1 0 10\n").unwrap();
/// assert_eq!(graph.num_vertices(), 3);
/// assert_eq!(graph.demand(1), 4);
/// assert_eq!(graph.cost(0, 1), 10);
/// assert_eq!(graph.cost(0, 2), 0); // never listed
/// ```
pub fn parse_instance(text: &str) -> Result<Graph> {
    let mut tokens = Tokens::new(text);

    let size = tokens.next_usize("vertex count")?;
    if size == 0 {
        return Err(Error::MalformedInstance(
            "instance must contain at least the depot".into(),
        ));
    }
    let mut graph = Graph::new(size);

    for _ in 1..size {
        let vertex = tokens.next_usize("demand vertex")?;
        let demand = tokens.next_u64("vertex demand")?;
        check_vertex(vertex, size)?;
        graph.set_demand(vertex, demand);
    }

    let declared_edges = tokens.next_u64("edge count")?;

    let mut edges = 0u64;
    while let Some(origin) = tokens.try_next_usize("edge origin")? {
        let destination = tokens.next_usize("edge destination")?;
        let cost = tokens.next_u64("edge cost")?;
        check_vertex(origin, size)?;
        check_vertex(destination, size)?;
        graph.set_cost(origin, destination, cost);
        edges += 1;
    }

    debug!(
        "parsed instance with {} vertices, {} edges ({} declared)",
        size, edges, declared_edges
    );
    Ok(graph)
}

/// Formats routes as the conventional report line: stop sequences joined
/// with ` | `.
///
/// # Examples
///
/// ```
/// use cvrp_exact::io::format_routes;
/// use cvrp_exact::models::CandidateRoute;
///
/// let routes = vec![
///     CandidateRoute::from_customers(&[1, 2]),
///     CandidateRoute::from_customers(&[3]),
/// ];
/// assert_eq!(format_routes(&routes), "0 1 2 0 | 0 3 0");
/// ```
pub fn format_routes(routes: &[CandidateRoute]) -> String {
    routes
        .iter()
        .map(|route| route.to_string())
        .collect::<Vec<_>>()
        .join(" | ")
}

fn check_vertex(vertex: usize, size: usize) -> Result<()> {
    if vertex >= size {
        return Err(Error::VertexOutOfRange { vertex, size });
    }
    Ok(())
}

struct Tokens<'a> {
    iter: Peekable<SplitWhitespace<'a>>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            iter: text.split_whitespace().peekable(),
        }
    }

    fn next_token(&mut self, what: &str) -> Result<&'a str> {
        self.iter.next().ok_or_else(|| {
            Error::MalformedInstance(format!("unexpected end of input, expected {what}"))
        })
    }

    fn next_usize(&mut self, what: &str) -> Result<usize> {
        let token = self.next_token(what)?;
        token
            .parse()
            .map_err(|_| Error::MalformedInstance(format!("expected {what}, found `{token}`")))
    }

    fn next_u64(&mut self, what: &str) -> Result<u64> {
        let token = self.next_token(what)?;
        token
            .parse()
            .map_err(|_| Error::MalformedInstance(format!("expected {what}, found `{token}`")))
    }

    /// Like [`Tokens::next_usize`], but `Ok(None)` at end of input.
    fn try_next_usize(&mut self, what: &str) -> Result<Option<usize>> {
        if self.iter.peek().is_none() {
            return Ok(None);
        }
        self.next_usize(what).map(Some)
    }
}

//! Network provider backed by `nodes.csv` and `edges.csv` tables.
use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use infodemics_core::{EdgeRecord, NetworkSource, NodeRecord};
use tracing::{debug, instrument};

use crate::errors::CsvProviderError;
use crate::parse::{Header, RecordReader};

/// File name of the node table inside a data directory.
pub const NODES_FILE: &str = "nodes.csv";
/// File name of the edge table inside a data directory.
pub const EDGES_FILE: &str = "edges.csv";

const ID_COLUMNS: &[&str] = &["id"];
const LABEL_COLUMNS: &[&str] = &["label"];
const FOLLOWER_COLUMNS: &[&str] = &["followers", "followers_count"];
const SOURCE_COLUMNS: &[&str] = &["source"];
const TARGET_COLUMNS: &[&str] = &["target"];

/// Node and edge records read from comma-separated tables.
///
/// The node table needs `id`, `label` and `followers` (or
/// `followers_count`) columns; the edge table needs `source` and `target`.
/// Extra columns are ignored. Edges may name identifiers missing from the
/// node table; the graph builder drops them.
///
/// # Examples
/// ```
/// use infodemics_core::NetworkSource;
/// use infodemics_providers_csv::CsvNetworkProvider;
///
/// let nodes = "id,label,followers\n1,5G_Conspiracy,10\n2,Non_Conspiracy,3\n";
/// let edges = "source,target\n1,2\n";
/// let provider = CsvNetworkProvider::try_from_readers("demo", nodes.as_bytes(), edges.as_bytes())?;
/// assert_eq!(provider.node_count(), 2);
/// assert_eq!(provider.edge_count(), 1);
/// # Ok::<(), infodemics_providers_csv::CsvProviderError>(())
/// ```
#[derive(Clone, Debug)]
pub struct CsvNetworkProvider {
    name: String,
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
}

impl CsvNetworkProvider {
    /// Parses both tables from buffered readers.
    ///
    /// Errors name the tables as [`NODES_FILE`] and [`EDGES_FILE`].
    ///
    /// # Errors
    /// Returns a [`CsvProviderError`] describing the first malformed row.
    pub fn try_from_readers(
        name: impl Into<String>,
        nodes: impl BufRead,
        edges: impl BufRead,
    ) -> Result<Self, CsvProviderError> {
        Self::load(name.into(), nodes, NODES_FILE, edges, EDGES_FILE)
    }

    /// Opens and parses the two tables at the given paths.
    ///
    /// # Errors
    /// Returns [`CsvProviderError::Open`] when a file cannot be opened and
    /// any parse error from [`Self::try_from_readers`].
    pub fn try_from_paths(
        nodes: impl AsRef<Path>,
        edges: impl AsRef<Path>,
    ) -> Result<Self, CsvProviderError> {
        let nodes = nodes.as_ref();
        let edges = edges.as_ref();
        let name = nodes
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or(nodes)
            .display()
            .to_string();
        Self::load(
            name,
            open(nodes)?,
            &nodes.display().to_string(),
            open(edges)?,
            &edges.display().to_string(),
        )
    }

    /// Loads [`NODES_FILE`] and [`EDGES_FILE`] from `dir`.
    ///
    /// # Errors
    /// See [`Self::try_from_paths`].
    pub fn try_from_dir(dir: impl AsRef<Path>) -> Result<Self, CsvProviderError> {
        let dir = dir.as_ref();
        Self::try_from_paths(dir.join(NODES_FILE), dir.join(EDGES_FILE))
    }

    #[instrument(name = "csv.load", err, skip(nodes, edges))]
    fn load(
        name: String,
        nodes: impl BufRead,
        nodes_file: &str,
        edges: impl BufRead,
        edges_file: &str,
    ) -> Result<Self, CsvProviderError> {
        let nodes = read_nodes(nodes, nodes_file)?;
        let edges = read_edges(edges, edges_file)?;
        debug!(nodes = nodes.len(), edges = edges.len(), "loaded network tables");
        Ok(Self { name, nodes, edges })
    }
}

impl NetworkSource for CsvNetworkProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }
}

fn open(path: &Path) -> Result<BufReader<File>, CsvProviderError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| CsvProviderError::Open {
            path: path.to_path_buf(),
            source,
        })
}

fn read_header<R: BufRead>(
    reader: &mut RecordReader<'_, R>,
    file: &str,
) -> Result<Header, CsvProviderError> {
    reader
        .next_record()?
        .map(Header::from_record)
        .ok_or_else(|| CsvProviderError::EmptyInput {
            file: file.to_owned(),
        })
}

fn read_nodes(input: impl BufRead, file: &str) -> Result<Vec<NodeRecord>, CsvProviderError> {
    let mut reader = RecordReader::new(input, file);
    let header = read_header(&mut reader, file)?;
    let id_col = header.require(file, "id", ID_COLUMNS)?;
    let label_col = header.require(file, "label", LABEL_COLUMNS)?;
    let followers_col = header.require(file, "followers", FOLLOWER_COLUMNS)?;

    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut records = Vec::new();
    while let Some(record) = reader.next_record()? {
        let line = record.line();
        let id = record
            .value(id_col)
            .ok_or_else(|| CsvProviderError::MissingField {
                file: file.to_owned(),
                line,
                column: "id",
            })?;
        if let Some(&first_line) = first_seen.get(id) {
            return Err(CsvProviderError::DuplicateNodeId {
                file: file.to_owned(),
                line,
                id: id.to_owned(),
                first_line,
            });
        }
        // A blank label classifies as non-conspiracy.
        let label = record.value(label_col).unwrap_or_default();
        let raw_followers =
            record
                .value(followers_col)
                .ok_or_else(|| CsvProviderError::MissingField {
                    file: file.to_owned(),
                    line,
                    column: "followers",
                })?;
        let followers =
            raw_followers
                .parse::<u64>()
                .map_err(|_| CsvProviderError::InvalidFollowers {
                    file: file.to_owned(),
                    line,
                    value: raw_followers.to_owned(),
                })?;
        first_seen.insert(id.to_owned(), line);
        records.push(NodeRecord::new(id, label, followers));
    }
    Ok(records)
}

fn read_edges(input: impl BufRead, file: &str) -> Result<Vec<EdgeRecord>, CsvProviderError> {
    let mut reader = RecordReader::new(input, file);
    let header = read_header(&mut reader, file)?;
    let source_col = header.require(file, "source", SOURCE_COLUMNS)?;
    let target_col = header.require(file, "target", TARGET_COLUMNS)?;

    let mut records = Vec::new();
    while let Some(record) = reader.next_record()? {
        let endpoint = |index: usize, column: &'static str| {
            record
                .value(index)
                .ok_or_else(|| CsvProviderError::MissingField {
                    file: file.to_owned(),
                    line: record.line(),
                    column,
                })
        };
        let source = endpoint(source_col, "source")?;
        let target = endpoint(target_col, "target")?;
        records.push(EdgeRecord::new(source, target));
    }
    Ok(records)
}

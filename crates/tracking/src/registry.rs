use std::{error::Error, fmt, fs::File, hash::Hash, io, path::Path};

use indexmap::IndexMap;
use model::{line::Line, stop::Stop};
use serde::de::DeserializeOwned;
use utility::id::Id;

/// Failure to load one of the static lookup tables. Both tables are
/// required collaborators, so loading happens once at startup and a
/// failure is fatal there.
#[derive(Debug)]
pub enum RegistryError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Io(why) => write!(f, "could not read table: {}", why),
            RegistryError::Json(why) => write!(f, "could not parse table: {}", why),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RegistryError::Io(why) => Some(why),
            RegistryError::Json(why) => Some(why),
        }
    }
}

impl From<io::Error> for RegistryError {
    fn from(why: io::Error) -> Self {
        Self::Io(why)
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(why: serde_json::Error) -> Self {
        Self::Json(why)
    }
}

fn read_table<K, V, P>(path: P) -> Result<IndexMap<K, V>, RegistryError>
where
    K: DeserializeOwned + Hash + Eq,
    V: DeserializeOwned,
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    Ok(serde_json::from_reader(io::BufReader::new(file))?)
}

/// The static stop table, stop id to stop point, in file order.
#[derive(Debug, Clone, Default)]
pub struct StopRegistry {
    stops: IndexMap<Id<Stop>, Stop>,
}

impl StopRegistry {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        Ok(Self {
            stops: read_table(path)?,
        })
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, RegistryError> {
        Ok(Self {
            stops: serde_json::from_reader(reader)?,
        })
    }

    pub fn get(&self, id: &Id<Stop>) -> Option<&Stop> {
        self.stops.get(id)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Id<Stop>, &Stop)> {
        self.stops.iter()
    }
}

/// The static line table, line id to line, in file order.
#[derive(Debug, Clone, Default)]
pub struct LineRegistry {
    lines: IndexMap<Id<Line>, Line>,
}

impl LineRegistry {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        Ok(Self {
            lines: read_table(path)?,
        })
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, RegistryError> {
        Ok(Self {
            lines: serde_json::from_reader(reader)?,
        })
    }

    pub fn get(&self, id: &Id<Line>) -> Option<&Line> {
        self.lines.get(id)
    }

    /// The rider-facing name of a line, e.g. "1" for the technical id "201".
    pub fn display_name(&self, id: &Id<Line>) -> Option<&str> {
        self.lines.get(id).map(|line| line.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Id<Line>, &Line)> {
        self.lines.iter()
    }
}

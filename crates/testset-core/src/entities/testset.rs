use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::collection::LazyCollection;
use crate::entities::{Area, dir_name};
use crate::errors::TestSetError;
use crate::layout::Layout;
use crate::lazy::Lazy;
use crate::structured;

/// Areas of a test set, keyed by area directory name.
pub type AreaCollection = LazyCollection<String, Area>;

/// Contents of the root metadata file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "RawTestSetMeta")]
pub struct TestSetMeta {
    pub description: String,
    pub version: i64,
}

/// Root metadata as found on disk. Older files carry `name` instead of `description`.
#[derive(Deserialize)]
struct RawTestSetMeta {
    description: Option<String>,
    name: Option<String>,
    version: i64,
}

impl TryFrom<RawTestSetMeta> for TestSetMeta {
    type Error = String;

    fn try_from(raw: RawTestSetMeta) -> Result<Self, Self::Error> {
        let description = raw
            .description
            .or(raw.name)
            .ok_or_else(|| "missing field `description`".to_string())?;
        Ok(Self {
            description,
            version: raw.version,
        })
    }
}

/// Root of a test set tree.
pub struct TestSet {
    root: PathBuf,
    name: String,
    layout: Layout,
    meta_path: PathBuf,
    meta: Lazy<TestSetMeta>,
    areas: AreaCollection,
}

impl TestSet {
    /// Open the test set at `root` with the default layout. No I/O happens here.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self::with_layout(root, Layout::default())
    }

    /// Open the test set at `root` using `layout` file names.
    pub fn with_layout(root: impl Into<PathBuf>, layout: Layout) -> Self {
        let root = root.into();
        tracing::debug!(root = %root.display(), "creating testset");
        let name = dir_name(&root);

        let membership_layout = layout.clone();
        let factory_layout = layout.clone();
        let dir = root.clone();
        let identity = name.clone();
        let areas = LazyCollection::new(
            &root,
            move |entry: &Path| {
                if !membership_layout.is_area_dir(entry) {
                    return None;
                }
                entry.file_name().map(|name| name.to_string_lossy().into_owned())
            },
            move |key: &String| Area::new(dir.join(key), &identity, &factory_layout),
        );

        Self {
            meta_path: root.join(&layout.metadata_file),
            root,
            name,
            layout,
            meta: Lazy::unloaded(),
            areas,
        }
    }

    /// A test set holding `meta` and exactly `areas`; nothing is read from disk.
    pub fn loaded(
        root: impl Into<PathBuf>,
        layout: Layout,
        meta: TestSetMeta,
        areas: IndexMap<String, Area>,
    ) -> Self {
        let root = root.into();
        Self {
            meta_path: root.join(&layout.metadata_file),
            name: dir_name(&root),
            areas: LazyCollection::loaded(&root, areas),
            root,
            layout,
            meta: Lazy::loaded(meta),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Root directory base name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity path of the test set, its name.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.meta.is_loaded()
    }

    /// Read the root metadata unless it has been read already.
    pub fn load_meta(&self) -> Result<&TestSetMeta, TestSetError> {
        self.meta.get_or_try_load(|| {
            tracing::debug!(path = %self.meta_path.display(), "loading testset metadata");
            structured::read(&self.meta_path)
        })
    }

    pub fn description(&self) -> Result<&str, TestSetError> {
        Ok(&self.load_meta()?.description)
    }

    pub fn version(&self) -> Result<i64, TestSetError> {
        Ok(self.load_meta()?.version)
    }

    #[must_use]
    pub const fn areas(&self) -> &AreaCollection {
        &self.areas
    }

    /// The area named `name`.
    pub fn area(&self, name: &str) -> Result<&Area, TestSetError> {
        self.areas.get(&name.to_string())
    }

    /// Every area, ordered by path.
    pub fn sorted_areas(&self) -> Result<Vec<&Area>, TestSetError> {
        let mut areas = self.areas.values()?;
        areas.sort();
        Ok(areas)
    }

    /// Write the root metadata file. Areas are not written.
    pub fn dump_meta(&self) -> Result<(), TestSetError> {
        tracing::debug!(path = %self.meta_path.display(), "dumping testset");
        structured::write(&self.meta_path, self.load_meta()?)
    }
}

impl fmt::Debug for TestSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestSet")
            .field("root", &self.root)
            .field("meta", &self.meta)
            .field("areas", &self.areas)
            .finish_non_exhaustive()
    }
}

//! The canonical in-memory collection of documentation entries.

use crate::payload::{Payload, RawPage};
use crate::types::{Entry, Page, Project};
use std::sync::Arc;

/// Owns every ingested entry together with the project/page structure it came from.
///
/// Built once from a [`Payload`] and read-only afterwards. Entries are additionally
/// kept in a flat sequence whose order defines document ids for both indexes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryStore {
    projects: Vec<Project>,
    /// Pages from payloads without a project dimension
    unscoped: Vec<Page>,
    entries: Vec<Arc<Entry>>,
}

impl EntryStore {
    /// Resolves any accepted payload shape into the canonical model.
    ///
    /// Entries without a `projectId` inherit the key of the project they were listed
    /// under, so nested and flat project layouts produce identical entries.
    pub fn from_payload(payload: Payload) -> Self {
        let mut store = Self::default();

        match payload {
            Payload::Entries(entries) => {
                store.push_unscoped(vec![RawPage {
                    document: None,
                    entries,
                }]);
            }
            Payload::Hovercraft(hovercraft) => match hovercraft.into_parts() {
                (Some(project_id), pages) => store.push_project(project_id, pages),
                (None, pages) => store.push_unscoped(pages),
            },
            Payload::Projects(projects) => {
                // The outer key is authoritative; an embedded projectId only repeats it.
                for (key, hovercraft) in projects {
                    let (_, pages) = hovercraft.into_parts();
                    store.push_project(key, pages);
                }
            }
        }

        store
    }

    fn push_project(&mut self, project_id: String, raw_pages: Vec<RawPage>) {
        let pages = raw_pages
            .into_iter()
            .map(|page| {
                self.ingest_page(page, |mut entry| {
                    entry.project_id.get_or_insert_with(|| project_id.clone());
                    entry
                })
            })
            .collect();

        self.projects.push(Project { project_id, pages });
    }

    fn push_unscoped(&mut self, raw_pages: Vec<RawPage>) {
        let pages: Vec<Page> = raw_pages
            .into_iter()
            .map(|page| self.ingest_page(page, |entry| entry))
            .collect();
        self.unscoped.extend(pages);
    }

    fn ingest_page(&mut self, page: RawPage, resolve: impl Fn(Entry) -> Entry) -> Page {
        let entries: Vec<Arc<Entry>> = page
            .entries
            .into_iter()
            .map(|entry| Arc::new(resolve(entry)))
            .collect();
        self.entries.extend(entries.iter().cloned());

        Page {
            document: page.document,
            entries,
        }
    }

    /// All entries in ingestion order. The position of an entry is its document id.
    pub fn entries(&self) -> &[Arc<Entry>] {
        &self.entries
    }

    /// Iterates entries together with the id of the project that owns them.
    pub fn entries_with_project(&self) -> impl Iterator<Item = (Option<&str>, &Arc<Entry>)> {
        self.entries
            .iter()
            .map(|entry| (entry.project_id.as_deref(), entry))
    }

    /// Projects in ingestion order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Known project ids, in the same order as [`Self::projects`].
    pub fn project_ids(&self) -> Vec<String> {
        self.projects
            .iter()
            .map(|project| project.project_id.clone())
            .collect()
    }

    /// Pages that arrived without any project.
    pub(crate) fn unscoped_pages(&self) -> &[Page] {
        &self.unscoped
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

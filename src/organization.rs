//! Organization statistics — per-organization document and note counts.
//!
//! Rows are supplied by the persistence layer as a `Dataset`; everything
//! here is grouped counting over those rows. An organization with no rows
//! for a count gets `0`, never a missing value.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{OrganizationError, OrganizationResult};

static SLUG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("slug pattern is valid")
});

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// Who may see a document or note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    Deleted,
    Private,
    Organization,
    Exclusive,
    Public,
    Pending,
    Invisible,
    Error,
}

impl Access {
    /// Visible to everyone.
    pub fn is_public(self) -> bool {
        self == Access::Public
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub demo: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: u64,
    pub organization_id: u64,
    pub access: Access,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub id: u64,
    pub document_id: u64,
    pub organization_id: u64,
    pub access: Access,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Contributor,
    Reviewer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub email: String,
    pub organization_id: u64,
    pub role: Role,
}

// ---------------------------------------------------------------------------
// Reporting shapes
// ---------------------------------------------------------------------------

/// What API and reporting layers see for an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationSummary {
    pub name: String,
    pub slug: String,
    pub demo: bool,
    pub id: u64,
    pub document_count: u64,
    pub note_count: u64,
}

impl OrganizationSummary {
    pub fn for_organization(
        org: &Organization,
        document_counts: &HashMap<u64, u64>,
        note_counts: &HashMap<u64, u64>,
    ) -> Self {
        OrganizationSummary {
            name: org.name.clone(),
            slug: org.slug.clone(),
            demo: org.demo,
            id: org.id,
            document_count: document_counts.get(&org.id).copied().unwrap_or(0),
            note_count: note_counts.get(&org.id).copied().unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationSlug {
    pub name: String,
    pub slug: String,
}

/// Group rows by organization id and count them.
pub fn count_by_organization<I>(organization_ids: I) -> HashMap<u64, u64>
where
    I: IntoIterator<Item = u64>,
{
    let mut counts = HashMap::new();
    for id in organization_ids {
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

/// Organizations keyed by id, with name and slug uniqueness enforced.
#[derive(Debug, Clone, Default)]
pub struct OrganizationDirectory {
    organizations: Vec<Organization>,
}

impl OrganizationDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, org: Organization) -> OrganizationResult<()> {
        validate(&org)?;
        if self.get(org.id).is_some() {
            return Err(OrganizationError::DuplicateId(org.id));
        }
        if self.organizations.iter().any(|o| o.name == org.name) {
            return Err(OrganizationError::DuplicateName(org.name));
        }
        if self.organizations.iter().any(|o| o.slug == org.slug) {
            return Err(OrganizationError::DuplicateSlug(org.slug));
        }
        self.organizations.push(org);
        Ok(())
    }

    pub fn get(&self, id: u64) -> Option<&Organization> {
        self.organizations.iter().find(|o| o.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Organization> {
        self.organizations.iter()
    }

    pub fn len(&self) -> usize {
        self.organizations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.organizations.is_empty()
    }
}

fn validate(org: &Organization) -> OrganizationResult<()> {
    if org.name.trim().is_empty() {
        return Err(OrganizationError::BlankName);
    }
    if org.slug.trim().is_empty() {
        return Err(OrganizationError::BlankSlug);
    }
    if !SLUG.is_match(&org.slug) {
        return Err(OrganizationError::InvalidSlug(org.slug.clone()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Dataset queries
// ---------------------------------------------------------------------------

/// Rows handed over by the persistence layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub organizations: Vec<Organization>,
    #[serde(default)]
    pub documents: Vec<DocumentRecord>,
    #[serde(default)]
    pub annotations: Vec<AnnotationRecord>,
    #[serde(default)]
    pub accounts: Vec<Account>,
}

impl Dataset {
    /// Validate every organization row, returning them as a directory.
    pub fn directory(&self) -> OrganizationResult<OrganizationDirectory> {
        let mut directory = OrganizationDirectory::new();
        for org in &self.organizations {
            directory.insert(org.clone())?;
        }
        Ok(directory)
    }

    pub fn public_document_counts(&self) -> HashMap<u64, u64> {
        count_by_organization(
            self.documents
                .iter()
                .filter(|d| d.access.is_public())
                .map(|d| d.organization_id),
        )
    }

    pub fn public_note_counts(&self) -> HashMap<u64, u64> {
        count_by_organization(
            self.annotations
                .iter()
                .filter(|a| a.access.is_public())
                .map(|a| a.organization_id),
        )
    }

    pub fn summary(&self, org: &Organization) -> OrganizationSummary {
        OrganizationSummary::for_organization(
            org,
            &self.public_document_counts(),
            &self.public_note_counts(),
        )
    }

    /// Non-demo organizations with at least one public document, with their
    /// public document and note counts, ordered by id.
    pub fn listed(&self) -> Vec<OrganizationSummary> {
        let documents = self.public_document_counts();
        let notes = self.public_note_counts();
        let mut listed: Vec<_> = self
            .organizations
            .iter()
            .filter(|org| !org.demo && documents.contains_key(&org.id))
            .map(|org| OrganizationSummary::for_organization(org, &documents, &notes))
            .collect();
        listed.sort_by_key(|summary| summary.id);
        listed
    }

    /// Names of the organizations owning `documents`, keyed by id.
    pub fn names_for_documents(&self, documents: &[DocumentRecord]) -> HashMap<u64, String> {
        let ids: HashSet<u64> = documents.iter().map(|d| d.organization_id).collect();
        self.organizations
            .iter()
            .filter(|org| ids.contains(&org.id))
            .map(|org| (org.id, org.name.clone()))
            .collect()
    }

    pub fn all_slugs(&self) -> Vec<OrganizationSlug> {
        self.organizations
            .iter()
            .map(|org| OrganizationSlug {
                name: org.name.clone(),
                slug: org.slug.clone(),
            })
            .collect()
    }

    /// Every document uploaded under the organization, whatever its access.
    pub fn document_count(&self, organization_id: u64) -> u64 {
        self.documents
            .iter()
            .filter(|d| d.organization_id == organization_id)
            .count() as u64
    }

    pub fn admin_emails(&self, organization_id: u64) -> Vec<String> {
        self.accounts
            .iter()
            .filter(|a| a.organization_id == organization_id && a.role == Role::Admin)
            .map(|a| a.email.clone())
            .collect()
    }
}

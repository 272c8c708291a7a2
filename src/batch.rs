//! Bulk lanyard mode: CSV rows in, one ZIP of QR artifacts out.
//!
//! Records are processed strictly sequentially and per-item failures are
//! isolated: a row whose payload exceeds capacity is logged and excluded
//! from the container, it never aborts its siblings.

use std::io::{Cursor, Read, Write as _};

use anyhow::Context as _;

use crate::error::{QrForgeError, QrForgeResult};
use crate::model::{Contact, ContentRecord, OutputFormat, QrArtifact, StyleOptions};
use crate::naming::file_name;
use crate::pipeline::generate;

/// Exact header expected in uploaded CSV files, in column order.
pub const CSV_HEADERS: [&str; 8] = [
    "firstName",
    "lastName",
    "organization",
    "title",
    "email",
    "phone",
    "website",
    "address",
];

/// Header-only template offered for download.
pub const TEMPLATE_CSV: &str = "firstName,lastName,organization,title,email,phone,website,address\n";

/// Advisory per-file limit; larger files still process but are flagged.
pub const MAX_BATCH_RECORDS: usize = 150;

/// One CSV row with the stable positional identifier assigned at parse
/// time. Ordinals are 1-based and survive edits and deletes unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchRecord {
    pub ordinal: u32,
    pub contact: Contact,
}

impl BatchRecord {
    pub fn file_name(&self, extension: &str) -> String {
        file_name(
            self.ordinal,
            &self.contact.first_name,
            &self.contact.last_name,
            extension,
        )
    }
}

#[derive(Clone, Debug, Default)]
pub struct Batch {
    records: Vec<BatchRecord>,
}

impl Batch {
    /// Parses CSV input into ordered batch records.
    ///
    /// The header row must match [`CSV_HEADERS`] exactly; a malformed row
    /// fails the whole parse since ordinals would otherwise be ambiguous.
    pub fn from_csv(input: impl Read) -> QrForgeResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        let headers = reader.headers().context("read csv header")?.clone();
        let expected: Vec<&str> = CSV_HEADERS.to_vec();
        let found: Vec<&str> = headers.iter().collect();
        if found != expected {
            return Err(QrForgeError::validation(format!(
                "csv header must be '{}', got '{}'",
                expected.join(","),
                found.join(",")
            )));
        }

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<Contact>().enumerate() {
            let ordinal = (index + 1) as u32;
            let contact = row.with_context(|| format!("parse csv row {ordinal}"))?;
            records.push(BatchRecord { ordinal, contact });
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[BatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Removes the record with `ordinal`. Remaining records keep their
    /// ordinals; deleting row k never renumbers its siblings.
    pub fn remove(&mut self, ordinal: u32) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.ordinal != ordinal);
        self.records.len() != before
    }

    /// Replaces the contact stored under `ordinal`, keeping the ordinal.
    pub fn replace(&mut self, ordinal: u32, contact: Contact) -> bool {
        match self.records.iter_mut().find(|r| r.ordinal == ordinal) {
            Some(record) => {
                record.contact = contact;
                true
            }
            None => false,
        }
    }

    /// Generates one artifact per record, strictly sequentially: each record
    /// is fully encoded and composited before the next begins.
    #[tracing::instrument(skip(self, style), fields(records = self.records.len()))]
    pub fn run(&self, style: &StyleOptions, format: OutputFormat) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for record in &self.records {
            let content = ContentRecord::LanyardContact(record.contact.clone());
            match generate(&content, style, format) {
                Ok(Some(artifact)) => {
                    tracing::debug!(ordinal = record.ordinal, "record encoded");
                    outcome.push_artifact(record, artifact);
                }
                // a vCard payload is never empty, but stay total anyway
                Ok(None) => outcome.push_failure(
                    record.ordinal,
                    QrForgeError::encoding("record produced an empty payload"),
                ),
                Err(err) => outcome.push_failure(record.ordinal, err),
            }
        }
        outcome
    }
}

/// A finished artifact file, keyed by its container filename.
#[derive(Clone, Debug)]
pub struct NamedArtifact {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// A per-record failure, excluded from the container but never silent.
#[derive(Debug)]
pub struct BatchFailure {
    pub ordinal: u32,
    pub error: QrForgeError,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub artifacts: Vec<NamedArtifact>,
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    fn push_artifact(&mut self, record: &BatchRecord, artifact: QrArtifact) {
        if let Some(png) = artifact.png {
            self.artifacts.push(NamedArtifact {
                name: record.file_name("png"),
                bytes: png,
            });
        }
        if let Some(svg) = artifact.svg {
            self.artifacts.push(NamedArtifact {
                name: record.file_name("svg"),
                bytes: svg.into_bytes(),
            });
        }
    }

    fn push_failure(&mut self, ordinal: u32, error: QrForgeError) {
        tracing::warn!(ordinal = %format!("{ordinal:03}"), %error, "record excluded from container");
        self.failures.push(BatchFailure { ordinal, error });
    }
}

/// Packages artifacts into a single ZIP container, keyed by filename.
/// Failed records were already excluded upstream; packaging tolerates a
/// partially failed batch and archives whatever did succeed.
pub fn package_zip(artifacts: &[NamedArtifact]) -> QrForgeResult<Vec<u8>> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for artifact in artifacts {
        writer
            .start_file(artifact.name.as_str(), options)
            .with_context(|| format!("start zip entry '{}'", artifact.name))?;
        writer
            .write_all(&artifact.bytes)
            .with_context(|| format!("write zip entry '{}'", artifact.name))?;
    }

    let cursor = writer.finish().context("finalize zip container")?;
    Ok(cursor.into_inner())
}

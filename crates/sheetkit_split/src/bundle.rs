//! Archive staging and bundling.

use std::fs;
use std::io::{Cursor, Write as _};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::spec::{SpecDocumentBlob, SplitBatchError};

/// Bundle the produced documents into one ZIP archive blob.
///
/// Documents are staged in a per-batch unique temporary directory before the
/// archive is encoded; the staging directory is removed when it drops, on
/// the success and failure paths alike.
pub fn bundle_documents_to_archive(
    l_documents: &[SpecDocumentBlob],
) -> Result<Vec<u8>, SplitBatchError> {
    let dir_staging = tempfile::Builder::new()
        .prefix("sheetkit_batch_")
        .tempdir()
        .map_err(|e| SplitBatchError::StagingFailed {
            message: e.to_string(),
        })?;

    for document in l_documents {
        fs::write(dir_staging.path().join(&document.name_file), &document.v_bytes).map_err(
            |e| SplitBatchError::StagingFailed {
                message: e.to_string(),
            },
        )?;
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let cfg_entry_options =
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for document in l_documents {
        let v_staged = fs::read(dir_staging.path().join(&document.name_file)).map_err(|e| {
            SplitBatchError::StagingFailed {
                message: e.to_string(),
            }
        })?;

        writer
            .start_file(document.name_file.as_str(), cfg_entry_options)
            .map_err(|e| SplitBatchError::BundleFailed {
                message: e.to_string(),
            })?;
        writer
            .write_all(&v_staged)
            .map_err(|e| SplitBatchError::BundleFailed {
                message: e.to_string(),
            })?;
    }

    let cursor = writer.finish().map_err(|e| SplitBatchError::BundleFailed {
        message: e.to_string(),
    })?;

    Ok(cursor.into_inner())
}

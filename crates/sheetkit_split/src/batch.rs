//! End-to-end batch orchestration.

use log::{error, info};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use sheetkit_grid::decode::decode_grid_from_bytes;

use crate::bundle::bundle_documents_to_archive;
use crate::conf::{EnumSplitProfile, derive_theme_fill_color};
use crate::partition::{derive_output_columns, partition_rows};
use crate::render::render_partition_document;
use crate::report::{ReportSplit, ReportSplitBuilder};
use crate::spec::{EnumSplitOutput, SpecDocumentBlob, SpecPartition, SpecSplitOptions, SplitBatchError};
use crate::util::{calculate_worker_limit, sanitize_artifact_stem};

/// Run the full split pipeline over one input workbook.
///
/// Stages: decode → derive output columns → partition → render one document
/// per partition → optionally bundle into one archive. Input errors fail the
/// whole batch before anything is rendered; render failures are folded into
/// the report per partition and never abort siblings; a bundling failure
/// fails the batch at the final step.
pub fn process_split(
    v_input: &[u8],
    name_profile: &str,
    label_date: &str,
    name_theme: Option<&str>,
    spec_split_options: SpecSplitOptions,
) -> Result<ReportSplit, SplitBatchError> {
    let Some(profile) = EnumSplitProfile::from_name(name_profile) else {
        return Err(SplitBatchError::InvalidProfileName(name_profile.to_string()));
    };

    let grid = decode_grid_from_bytes(v_input).map_err(SplitBatchError::GridDecodeFailed)?;
    if grid.cells_header.is_empty() {
        return Err(SplitBatchError::EmptyGrid);
    }
    info!("Input grid decoded: {} data rows.", grid.height());

    let cfg_profile = profile.config();
    let l_columns_output = derive_output_columns(&grid.cells_header, cfg_profile.columns_excluded);
    let l_partitions = partition_rows(&grid, profile, label_date)?;
    info!(
        "Partitioning complete: {} partitions ({} profile).",
        l_partitions.len(),
        profile.name()
    );

    let color_fill_banner = derive_theme_fill_color(name_theme);
    let mut builder_report = ReportSplitBuilder::default();

    let l_outcomes = render_partitions(
        &l_partitions,
        &l_columns_output,
        profile,
        color_fill_banner,
        spec_split_options.num_workers_max,
        &mut builder_report,
    );
    let l_documents = apply_render_outcomes(l_outcomes, &mut builder_report);

    let output = if spec_split_options.if_bundle_archive {
        EnumSplitOutput::Archive(bundle_documents_to_archive(&l_documents)?)
    } else {
        EnumSplitOutput::Documents(l_documents)
    };

    let report = builder_report.build(output);
    info!("{}", report.format("[SPLIT]"));
    Ok(report)
}

/// Render every partition, serially or through a bounded thread pool.
///
/// Outcomes come back in partition order either way, so the batch stays
/// deterministic and each failure remains attributable to its partition.
fn render_partitions(
    l_partitions: &[SpecPartition],
    l_columns_output: &[String],
    profile: EnumSplitProfile,
    color_fill_banner: &str,
    num_workers_max: Option<usize>,
    builder_report: &mut ReportSplitBuilder,
) -> Vec<(String, Result<Vec<u8>, String>)> {
    let render_one = |partition: &SpecPartition| {
        (
            partition.key.clone(),
            render_partition_document(partition, l_columns_output, profile, color_fill_banner),
        )
    };

    let n_workers_max = calculate_worker_limit(num_workers_max);
    if n_workers_max <= 1 {
        return l_partitions.iter().map(render_one).collect();
    }

    let thread_pool = ThreadPoolBuilder::new().num_threads(n_workers_max).build();
    let Ok(thread_pool) = thread_pool else {
        builder_report.add_warning(format!(
            "Failed to initialize thread pool (workers={n_workers_max}); fallback to serial render."
        ));
        return l_partitions.iter().map(render_one).collect();
    };

    thread_pool.install(|| l_partitions.par_iter().map(render_one).collect())
}

/// Fold per-partition render outcomes into the report and collect the
/// successfully encoded documents.
fn apply_render_outcomes(
    l_outcomes: Vec<(String, Result<Vec<u8>, String>)>,
    builder_report: &mut ReportSplitBuilder,
) -> Vec<SpecDocumentBlob> {
    let mut l_documents = Vec::new();

    for (c_key, res_render) in l_outcomes {
        match res_render {
            Ok(v_bytes) => {
                info!("{c_key} document generated.");
                builder_report.add_successful();
                l_documents.push(SpecDocumentBlob {
                    name_file: format!("{}.xlsx", sanitize_artifact_stem(&c_key, "_")),
                    v_bytes,
                });
            }
            Err(c_exception) => {
                error!("{c_key} document failed to generate: {c_exception}");
                builder_report.add_failed(c_key, c_exception);
            }
        }
    }

    l_documents
}

#[cfg(test)]
mod tests {
    use rust_xlsxwriter::Workbook;

    use super::{apply_render_outcomes, process_split};
    use crate::report::ReportSplitBuilder;
    use crate::spec::{EnumSplitOutput, SpecSplitOptions, SplitBatchError};

    const L_COLUMNS_INPUT: [&str; 6] = ["Location", "Site", "Category", "Manager", "Asset", "Issued"];

    fn build_input_workbook(l_rows: &[[&str; 6]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (n_idx_col, c_name) in L_COLUMNS_INPUT.iter().enumerate() {
            worksheet
                .write_string(0, n_idx_col as u16, *c_name)
                .expect("write header");
        }
        for (n_idx_row, l_cells) in l_rows.iter().enumerate() {
            for (n_idx_col, c_value) in l_cells.iter().enumerate() {
                worksheet
                    .write_string(1 + n_idx_row as u32, n_idx_col as u16, *c_value)
                    .expect("write cell");
            }
        }

        workbook.save_to_buffer().expect("save fixture")
    }

    fn build_default_input() -> Vec<u8> {
        build_input_workbook(&[
            ["HQ", "North", "Vault", "Al", "a1", "x"],
            ["HQ", "North", "vault", "Al", "a2", "x"],
            ["HQ", "North", "Lab", "Bo", "a3", "x"],
        ])
    }

    #[test]
    fn end_to_end_split_produces_one_document_per_partition() {
        let report = process_split(
            &build_default_input(),
            "category",
            "Jan 2026",
            None,
            SpecSplitOptions::default(),
        )
        .expect("process");

        assert_eq!(report.cnt_partitions, 2);
        assert_eq!(report.cnt_successful, 2);
        assert_eq!(report.cnt_failed, 0);

        let EnumSplitOutput::Documents(l_documents) = report.output else {
            panic!("expected document output");
        };
        let l_names: Vec<&str> = l_documents.iter().map(|d| d.name_file.as_str()).collect();
        assert_eq!(l_names, vec!["vault.xlsx", "lab.xlsx"]);
        for document in &l_documents {
            assert_eq!(&document.v_bytes[..2], b"PK");
        }
    }

    #[test]
    fn profile_name_is_matched_case_insensitively() {
        let report = process_split(
            &build_default_input(),
            "Category",
            "Jan 2026",
            None,
            SpecSplitOptions::default(),
        )
        .expect("process");
        assert_eq!(report.cnt_successful, 2);
    }

    #[test]
    fn unknown_profile_name_is_an_input_error() {
        let err = process_split(
            &build_default_input(),
            "team",
            "Jan 2026",
            None,
            SpecSplitOptions::default(),
        )
        .expect_err("must fail");
        assert!(matches!(err, SplitBatchError::InvalidProfileName(_)));
    }

    #[test]
    fn empty_key_value_fails_the_batch_with_no_output() {
        let v_input = build_input_workbook(&[
            ["HQ", "North", "Vault", "Al", "a1", "x"],
            ["HQ", "North", " ", "Al", "a2", "x"],
        ]);

        let err = process_split(
            &v_input,
            "category",
            "Jan 2026",
            None,
            SpecSplitOptions::default(),
        )
        .expect_err("must fail");
        assert!(matches!(err, SplitBatchError::MissingKeyValue { .. }));
    }

    #[test]
    fn unknown_theme_name_falls_back_to_the_default_without_error() {
        let report = process_split(
            &build_default_input(),
            "category",
            "Jan 2026",
            Some("NoSuchTheme"),
            SpecSplitOptions::default(),
        )
        .expect("process");
        assert_eq!(report.cnt_failed, 0);
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn empty_workbook_is_rejected_before_partitioning() {
        let mut workbook = Workbook::new();
        let _ = workbook.add_worksheet();
        let v_input = workbook.save_to_buffer().expect("save fixture");

        let err = process_split(
            &v_input,
            "category",
            "Jan 2026",
            None,
            SpecSplitOptions::default(),
        )
        .expect_err("must fail");
        assert!(matches!(err, SplitBatchError::EmptyGrid));
    }

    #[test]
    fn bundled_batch_returns_one_archive_of_all_documents() {
        let spec_split_options = SpecSplitOptions {
            if_bundle_archive: true,
            ..SpecSplitOptions::default()
        };
        let report = process_split(
            &build_default_input(),
            "category",
            "Jan 2026",
            None,
            spec_split_options,
        )
        .expect("process");

        let EnumSplitOutput::Archive(v_archive) = report.output else {
            panic!("expected archive output");
        };
        let mut archive =
            zip::ZipArchive::new(std::io::Cursor::new(v_archive)).expect("open archive");
        let l_names: Vec<String> = (0..archive.len())
            .map(|n_idx| archive.by_index(n_idx).expect("entry").name().to_string())
            .collect();
        assert_eq!(l_names, vec!["vault.xlsx", "lab.xlsx"]);
    }

    #[test]
    fn parallel_render_matches_serial_results() {
        let spec_split_options = SpecSplitOptions {
            num_workers_max: Some(4),
            ..SpecSplitOptions::default()
        };
        let report_parallel = process_split(
            &build_default_input(),
            "category",
            "Jan 2026",
            None,
            spec_split_options,
        )
        .expect("process");
        let report_serial = process_split(
            &build_default_input(),
            "category",
            "Jan 2026",
            None,
            SpecSplitOptions::default(),
        )
        .expect("process");

        assert_eq!(report_parallel.cnt_partitions, report_serial.cnt_partitions);
        assert_eq!(report_parallel.cnt_successful, report_serial.cnt_successful);

        let (EnumSplitOutput::Documents(l_parallel), EnumSplitOutput::Documents(l_serial)) =
            (report_parallel.output, report_serial.output)
        else {
            panic!("expected document output");
        };
        let l_names_parallel: Vec<&str> =
            l_parallel.iter().map(|d| d.name_file.as_str()).collect();
        let l_names_serial: Vec<&str> = l_serial.iter().map(|d| d.name_file.as_str()).collect();
        assert_eq!(l_names_parallel, l_names_serial);
    }

    #[test]
    fn rerun_on_identical_input_reports_identical_partitions() {
        let report_first = process_split(
            &build_default_input(),
            "category",
            "Jan 2026",
            None,
            SpecSplitOptions::default(),
        )
        .expect("process");
        let report_second = process_split(
            &build_default_input(),
            "category",
            "Jan 2026",
            None,
            SpecSplitOptions::default(),
        )
        .expect("process");

        assert_eq!(report_first.cnt_partitions, report_second.cnt_partitions);
        let (EnumSplitOutput::Documents(l_first), EnumSplitOutput::Documents(l_second)) =
            (report_first.output, report_second.output)
        else {
            panic!("expected document output");
        };
        let l_names_first: Vec<&str> = l_first.iter().map(|d| d.name_file.as_str()).collect();
        let l_names_second: Vec<&str> = l_second.iter().map(|d| d.name_file.as_str()).collect();
        assert_eq!(l_names_first, l_names_second);
    }

    #[test]
    fn one_failed_render_does_not_abort_sibling_partitions() {
        let l_outcomes = vec![
            ("vault".to_string(), Ok(b"PK-one".to_vec())),
            ("lab".to_string(), Err("disk full".to_string())),
            ("dock".to_string(), Ok(b"PK-two".to_vec())),
        ];

        let mut builder_report = ReportSplitBuilder::default();
        let l_documents = apply_render_outcomes(l_outcomes, &mut builder_report);

        assert_eq!(l_documents.len(), 2);
        assert_eq!(l_documents[0].name_file, "vault.xlsx");
        assert_eq!(l_documents[1].name_file, "dock.xlsx");

        let report = builder_report.build(EnumSplitOutput::Documents(l_documents));
        assert_eq!(report.cnt_partitions, 3);
        assert_eq!(report.cnt_successful, 2);
        assert_eq!(report.cnt_failed, 1);
        assert_eq!(report.errors[0].key, "lab");
    }
}

//! Human-readable table renderer.
//!
//! Prints one table per result set plus a one-line summary. Used by the
//! CLI's default output mode and by the finder when `verbose` is set; the
//! rendering never feeds back into the returned report.

use std::io::{self, Write};

use bytesize::ByteSize;
use yansi::Paint;

use crate::duplicates::{FindReport, ScanSummary};

/// Write the report tables to `writer`.
///
/// # Errors
///
/// Returns any I/O error from the underlying writer.
pub fn render<W: Write>(
    report: &FindReport,
    summary: &ScanSummary,
    writer: &mut W,
) -> io::Result<()> {
    match &report.duplicate_files {
        Some(groups) => {
            writeln!(writer, "{}", "Duplicate files".bold().underline())?;
            for group in groups {
                writeln!(
                    writer,
                    "{} {} ({} each, {} members, {})",
                    format!("#{}", group.group_id).cyan(),
                    &group.hash_hex()[..12],
                    ByteSize::b(group.size_bytes),
                    group.member_count(),
                    group.extensions.join(", ")
                )?;
                for member in &group.files {
                    writeln!(
                        writer,
                        "    {}  {}",
                        member.relative_path.display(),
                        super::rfc3339(member.modified).dim()
                    )?;
                }
            }
            writeln!(writer)?;
        }
        None => writeln!(writer, "{}", "No duplicate files found.".green())?,
    }

    match &report.duplicate_dirs {
        Some(rows) => {
            writeln!(writer, "{}", "Duplicate directories".bold().underline())?;
            for row in rows {
                writeln!(
                    writer,
                    "{} {} ({} files, {} in group)",
                    format!("#{}", row.group_id).cyan(),
                    row.relative_path.display(),
                    row.file_count,
                    row.group_size
                )?;
            }
            writeln!(writer)?;
        }
        None => writeln!(writer, "{}", "No duplicate directories found.".green())?,
    }

    writeln!(
        writer,
        "Scanned {} files, {} directories, hashed {} in {:.2?}",
        summary.total_files,
        summary.total_dirs,
        ByteSize::b(summary.bytes_hashed),
        summary.scan_duration
    )?;
    for warning in &summary.warnings {
        writeln!(writer, "{} {}", "warning:".yellow(), warning)?;
    }

    Ok(())
}

/// Print the report tables to stdout, ignoring write failures.
pub fn print(report: &FindReport, summary: &ScanSummary) {
    let _ = render(report, summary, &mut io::stdout());
}

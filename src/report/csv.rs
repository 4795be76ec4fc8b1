use std::io::Write;

use crate::analysis::AnalysisResult;
use crate::diff::ComparisonResult;

use super::ReportError;

pub fn write_analysis<W: Write>(out: &mut W, analysis: &AnalysisResult) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["path", "size", "compressed_size", "compression_method", "crc"])?;
    for entry in analysis.entries() {
        writer.write_record([
            entry.path.clone(),
            entry.size.to_string(),
            entry.compressed_size.to_string(),
            entry.compression_method.to_string(),
            format!("{:08x}", entry.crc),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_comparison<W: Write>(
    out: &mut W,
    comparison: &ComparisonResult,
) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["path", "change", "old_size", "new_size", "size_difference"])?;
    for change in comparison.file_changes() {
        writer.write_record([
            change.path.clone(),
            change.kind().to_string(),
            change.old_size().map(|s| s.to_string()).unwrap_or_default(),
            change.new_size().map(|s| s.to_string()).unwrap_or_default(),
            change.size_difference.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures;

    #[test]
    fn test_analysis_csv() {
        let mut out = Vec::new();
        write_analysis(&mut out, &fixtures::small()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "path,size,compressed_size,compression_method,crc");
        assert_eq!(lines[1], "classes.dex,1000,500,Deflated,0000abcd");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_comparison_csv_leaves_absent_sizes_empty() {
        let mut out = Vec::new();
        write_comparison(&mut out, &fixtures::comparison()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "path,change,old_size,new_size,size_difference");
        assert_eq!(lines[1], "lib/x86/libnative.so,ADDED,,300,300");
        assert_eq!(lines[2], "res/layout/main.xml,REMOVED,200,,-200");
        assert_eq!(lines[3], "assets/icon.png,MODIFIED,500,650,150");
    }
}

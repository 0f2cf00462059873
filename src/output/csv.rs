use super::{Formatter, RunSummary, format_db, iso8601_timestamp};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, summary: &RunSummary) -> String {
        let (noise_mse, noise_rmse, noise_psnr) = summary.noise_error.map_or(
            (String::new(), String::new(), String::new()),
            |e| {
                (
                    format!("{:.6}", e.mse),
                    format!("{:.6}", e.rmse),
                    format_db(e.psnr_db),
                )
            },
        );
        format!(
            "{},{},{},{},{},{},{:.6},{:.6},{},{},{},{}",
            iso8601_timestamp(),
            summary.signal_frequency,
            summary.sampling_frequency,
            summary.sample_count,
            summary.bit_depth,
            summary.nyquist.sufficient,
            summary.quantization_error.mse,
            summary.quantization_error.rmse,
            format_db(summary.quantization_error.psnr_db),
            noise_mse,
            noise_rmse,
            noise_psnr
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some(
            "ts,signal_hz,sampling_hz,samples,bits,nyquist_ok,quant_mse,quant_rmse,quant_psnr_db,noise_mse,noise_rmse,noise_psnr_db",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::default_summary;

    #[test]
    fn test_row_matches_header() {
        let formatter = CsvFormatter;
        let header_cols = formatter.header().unwrap().split(',').count();
        let row = formatter.format(&default_summary());
        assert_eq!(row.split(',').count(), header_cols);
    }
}

use crate::error::{IoError, IoResult};
use perceptron_lab_core::{LabError, Label, Matrix};
use std::path::Path;

/// Write samples and labels as CSV with a `x1,x2,...,label` header.
pub fn write_dataset_csv<P: AsRef<Path>>(path: P, x: &Matrix, y: &[Label]) -> IoResult<()> {
    if x.rows() != y.len() {
        return Err(LabError::LengthMismatch {
            features: x.rows(),
            labels: y.len(),
        }
        .into());
    }

    let mut wtr = csv::Writer::from_path(path)?;
    let mut header: Vec<String> = (1..=x.cols()).map(|j| format!("x{}", j)).collect();
    header.push("label".to_string());
    wtr.write_record(&header)?;

    for (row, label) in x.iter_rows().zip(y) {
        let mut record: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        record.push(label.to_string());
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Read a CSV written by [`write_dataset_csv`]: numeric feature columns
/// followed by a 0/1 label column.
pub fn read_dataset_csv<P: AsRef<Path>>(path: P) -> IoResult<(Matrix, Vec<Label>)> {
    let mut rdr = csv::Reader::from_path(path)?;
    let n_cols = rdr.headers()?.len().saturating_sub(1);

    let mut data = Vec::new();
    let mut labels = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or_default();
        let parse_err = |value: &str| IoError::Parse {
            line,
            value: value.to_string(),
        };

        let fields: Vec<&str> = record.iter().collect();
        let Some((label_field, features)) = fields.split_last() else {
            continue;
        };
        for &field in features {
            data.push(field.trim().parse::<f64>().map_err(|_| parse_err(field))?);
        }
        let raw: i64 = label_field
            .trim()
            .parse()
            .map_err(|_| parse_err(*label_field))?;
        labels.push(Label::try_from(raw)?);
    }

    let x = Matrix::new(data, labels.len(), n_cols)?;
    Ok((x, labels))
}

//! CSV export of joint-angle history and completed swings
//!
//! History layout: one row per sample index, one column per joint (in
//! joint order), values with two decimals, empty cell where a joint's
//! series is shorter than the longest one.

use std::collections::BTreeMap;
use std::io;

use csv::Writer;

use crate::error::Result;
use crate::pose::JointId;
use crate::segmentation::SwingRecord;

/// Write the joint history table to any writer
pub fn write_history_csv<W: io::Write>(history: &BTreeMap<JointId, Vec<f32>>, writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);

    let mut header = vec!["Index".to_string()];
    header.extend(history.keys().map(|joint| joint.name().to_string()));
    wtr.write_record(&header)?;

    let rows = history.values().map(Vec::len).max().unwrap_or(0);
    for i in 0..rows {
        let mut record = vec![i.to_string()];
        record.extend(
            history
                .values()
                .map(|series| series.get(i).map(|v| format!("{:.2}", v)).unwrap_or_default()),
        );
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Joint history table as a string
pub fn history_to_csv(history: &BTreeMap<JointId, Vec<f32>>) -> Result<String> {
    let mut buf = Vec::new();
    write_history_csv(history, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// One row per completed swing
pub fn swings_to_csv(records: &[SwingRecord]) -> Result<String> {
    let mut wtr = Writer::from_writer(Vec::new());
    wtr.write_record(["id", "start_time", "end_time", "duration", "path_len", "peak_phase"])?;

    for record in records {
        wtr.write_record(&[
            record.id().to_string(),
            format!("{:.2}", record.start_time()),
            format!("{:.2}", record.end_time()),
            format!("{:.2}", record.duration()),
            record.hand_path().len().to_string(),
            record.peak_phase().name().to_string(),
        ])?;
    }

    let buf = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmentation::SwingTracker;
    use crate::physics::SwingPhase;
    use crate::pose::Point;

    #[test]
    fn test_empty_history_is_header_only() {
        let csv = history_to_csv(&BTreeMap::new()).unwrap();
        assert_eq!(csv, "Index\n");
    }

    #[test]
    fn test_history_rows_and_padding() {
        let mut history = BTreeMap::new();
        history.insert(JointId::LeftKnee, vec![170.0]);
        history.insert(JointId::RightElbow, vec![90.0, 91.256]);

        let csv = history_to_csv(&history).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Index,Right Elbow,Left Knee");
        assert_eq!(lines[1], "0,90.00,170.00");
        assert_eq!(lines[2], "1,91.26,");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_write_to_writer() {
        let mut history = BTreeMap::new();
        history.insert(JointId::LeftShoulder, vec![12.0]);
        let mut out = Vec::new();
        write_history_csv(&history, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Index,Left Shoulder\n0,12.00\n");
    }

    #[test]
    fn test_swings_table() {
        let mut tracker = SwingTracker::new();
        let mut completed = None;
        let phases = [SwingPhase::Address, SwingPhase::Backswing]
            .into_iter()
            .chain(std::iter::repeat(SwingPhase::Finish).take(15));
        for (i, phase) in phases.enumerate() {
            completed = completed.or(tracker.process_phase(phase, Some(Point::new(0.0, 0.0)), i as f64 * 100.0));
        }
        assert!(completed.is_some());

        let csv = swings_to_csv(&tracker.history()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "id,start_time,end_time,duration,path_len,peak_phase");
        assert_eq!(lines[1], "1,100.00,1600.00,1.50,16,Finish");
    }
}

use std::io;
use std::path::Path;

use common::Result;
use normalizer::{Frame, Tabular};
use tracing::debug;

/// Writes the header row followed by one row per record.
pub fn write_frame<W: io::Write, R: Tabular>(
    writer: &mut csv::Writer<W>,
    frame: &Frame<R>,
) -> Result<()> {
    writer.write_record(frame.columns())?;
    for row in frame.rows() {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_csv<R: Tabular>(frame: &Frame<R>, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    write_frame(&mut writer, frame)?;
    debug!(path = %path.display(), rows = frame.len(), "wrote csv");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use normalizer::{CommitRecord, IssueRecord, IssueState};

    fn render<R: Tabular>(frame: &Frame<R>) -> String {
        let mut writer = csv::Writer::from_writer(Vec::new());
        write_frame(&mut writer, frame).expect("write frame");
        let bytes = writer
            .into_inner()
            .unwrap_or_else(|_| panic!("csv writer flush failed"));
        String::from_utf8(bytes).expect("utf8")
    }

    #[test]
    fn empty_frame_still_writes_header() {
        let frame: Frame<CommitRecord> = Frame::new(Vec::new());
        assert_eq!(render(&frame), "sha,author,email,date,message\n");
    }

    #[test]
    fn absent_duration_is_an_empty_cell() {
        let frame = Frame::new(vec![IssueRecord {
            id: 11,
            number: 1,
            title: "Crash, again".into(),
            user: "octocat".into(),
            state: IssueState::Open,
            created_at: "2024-01-01T00:00:00Z".into(),
            closed_at: None,
            open_duration_days: None,
            comments: 2,
        }]);
        let text = render(&frame);
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("id,number,title,user,state,created_at,closed_at,open_duration_days,comments")
        );
        assert_eq!(
            lines.next(),
            Some("11,1,\"Crash, again\",octocat,open,2024-01-01T00:00:00Z,,,2")
        );
    }

    #[test]
    fn writes_to_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("commits.csv");
        let frame = Frame::new(vec![CommitRecord {
            sha: "abc".into(),
            author: "Ada".into(),
            email: "ada@example.com".into(),
            date: "2024-01-01T00:00:00Z".into(),
            message: "Initial commit".into(),
        }]);
        write_csv(&frame, &path).expect("write csv");
        let text = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("abc,Ada,ada@example.com"));
    }

    #[test]
    fn missing_directory_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("out.csv");
        let frame: Frame<CommitRecord> = Frame::new(Vec::new());
        assert!(write_csv(&frame, &path).is_err());
    }
}

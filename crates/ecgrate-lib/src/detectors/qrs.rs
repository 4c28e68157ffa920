use crate::signal::{AnnotationRow, BeatInterval, QrsBeat};

/// Keep QRS rows in record order and place each R-peak at the complex midpoint.
pub fn select_qrs_beats(rows: &[AnnotationRow]) -> Vec<QrsBeat> {
    rows.iter()
        .filter(|row| row.is_qrs())
        .map(QrsBeat::from_row)
        .collect()
}

/// Forward differences between consecutive R-peaks.
///
/// Each interval is attributed to the later beat, so the first beat never
/// yields one. Intervals that are not finite are dropped.
pub fn beat_intervals(beats: &[QrsBeat]) -> Vec<BeatInterval> {
    beats
        .windows(2)
        .filter_map(|w| {
            let r_r_interval = w[1].r_timestamp - w[0].r_timestamp;
            r_r_interval.is_finite().then_some(BeatInterval {
                onset: w[1].onset,
                r_r_interval,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(wave_type: &str, onset: i64, offset: i64) -> AnnotationRow {
        AnnotationRow {
            wave_type: wave_type.into(),
            onset,
            offset,
            tags: String::new(),
        }
    }

    fn intervals_of(rows: &[AnnotationRow]) -> Vec<BeatInterval> {
        beat_intervals(&select_qrs_beats(rows))
    }

    fn fixture_rows() -> Vec<AnnotationRow> {
        vec![
            row("QRS", 800, 900),
            row("T", 1000, 1100),
            row("QRS", 1900, 2100),
            row("QRS", 3200, 3250),
            row("P", 3300, 3400),
            row("QRS", 4000, 4020),
            row("QRS", 8000, 8100),
        ]
    }

    #[test]
    fn selects_only_qrs_rows() {
        let beats = select_qrs_beats(&fixture_rows());
        let onsets: Vec<i64> = beats.iter().map(|b| b.onset).collect();
        assert_eq!(onsets, vec![800, 1900, 3200, 4000, 8000]);
    }

    #[test]
    fn intervals_are_attributed_to_later_beat() {
        let intervals = intervals_of(&fixture_rows());
        assert_eq!(
            intervals,
            vec![
                BeatInterval {
                    onset: 1900,
                    r_r_interval: 1150.0
                },
                BeatInterval {
                    onset: 3200,
                    r_r_interval: 1225.0
                },
                BeatInterval {
                    onset: 4000,
                    r_r_interval: 785.0
                },
                BeatInterval {
                    onset: 8000,
                    r_r_interval: 4040.0
                },
            ]
        );
    }

    #[test]
    fn fewer_than_two_beats_yield_nothing() {
        assert!(intervals_of(&[]).is_empty());
        assert!(intervals_of(&[row("QRS", 0, 10), row("T", 20, 30)]).is_empty());
    }

    #[test]
    fn out_of_order_beats_give_negative_interval() {
        let intervals = intervals_of(&[row("QRS", 1000, 1100), row("QRS", 500, 600)]);
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].r_r_interval, -500.0);
    }
}

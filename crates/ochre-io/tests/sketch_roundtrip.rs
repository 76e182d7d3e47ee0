// Copyright 2026 the Ochre Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! End-to-end sketch persistence through a real file.

use std::fs::File;
use std::io::{BufReader, BufWriter, Seek, SeekFrom, Write};

use uuid::Uuid;

use ochre_core::math::{LinearRgba, Quaternion, Vec3};
use ochre_core::sketch::{ControlPoint, GroupTag, Stroke, StrokeFlags};
use ochre_io::{read_sketch, write_sketch, SketchIoError};

fn wavy_stroke(guid: Uuid, n: usize, t0: u32, pressure: f32) -> Stroke {
    let points = (0..n)
        .map(|i| {
            ControlPoint::new(
                Vec3::new(i as f32 * 0.1, (i as f32 * 0.7).sin(), 0.0),
                Quaternion::from_axis_angle(Vec3::Y, i as f32 * 0.05),
                pressure,
                t0 + 16 * i as u32,
            )
        })
        .collect();
    Stroke::new(guid, 0.3, 1.0, LinearRgba::rgb(0.2, 0.4, 0.9), points)
}

#[test]
fn test_sketch_survives_a_file_round_trip() {
    let ink = Uuid::new_v4();
    let marker = Uuid::new_v4();

    let mut strokes = vec![
        wavy_stroke(ink, 40, 0, 0.9),
        wavy_stroke(marker, 25, 1_000, 0.4),
        wavy_stroke(ink, 10, 2_000, 1.0),
    ];
    strokes[0].group = GroupTag(3);
    strokes[0].flags = StrokeFlags::IS_GROUP_CONTINUE;
    strokes[1].brush_scale = 0.5;
    strokes[1].seed = 777;
    // Simplify away a couple of points from the middle stroke.
    strokes[1].drop_mask[5] = true;
    strokes[1].drop_mask[6] = true;

    let mut file = tempfile::tempfile().unwrap();
    let palette = {
        let mut sink = BufWriter::new(&mut file);
        let palette = write_sketch(&mut sink, &strokes).unwrap();
        sink.flush().unwrap();
        palette
    };
    assert_eq!(palette, vec![ink, marker]);

    file.seek(SeekFrom::Start(0)).unwrap();
    let loaded = read_sketch(BufReader::new(&mut file), &palette).unwrap();

    assert_eq!(loaded.len(), 3);

    assert_eq!(loaded[0].brush_guid, ink);
    assert_eq!(loaded[0].group, GroupTag(3));
    assert!(loaded[0].flags.contains(StrokeFlags::IS_GROUP_CONTINUE));
    assert_eq!(loaded[0].control_points, strokes[0].control_points);

    // Dropped points are gone from the file; the survivors match.
    assert_eq!(loaded[1].len(), 23);
    let survivors: Vec<ControlPoint> = strokes[1].retained_points().copied().collect();
    assert_eq!(loaded[1].control_points, survivors);
    assert_eq!(loaded[1].brush_scale, 0.5);
    assert_eq!(loaded[1].seed, 777);
    // A loaded stroke starts with a clear drop mask.
    assert_eq!(loaded[1].retained_len(), loaded[1].len());

    assert_eq!(loaded[2].brush_guid, ink);
    assert_eq!(loaded[2].head_timestamp_ms(), 2_000);
}

#[test]
fn test_truncated_file_reports_io_error() {
    let strokes = vec![wavy_stroke(Uuid::new_v4(), 30, 0, 1.0)];
    let mut buf = Vec::new();
    let palette = write_sketch(&mut buf, &strokes).unwrap();

    // Chop the file mid-way through the control point array.
    buf.truncate(buf.len() - 50);
    let err = read_sketch(buf.as_slice(), &palette).unwrap_err();
    assert!(matches!(err, SketchIoError::Io(_)));
}

#[test]
fn test_garbage_file_is_rejected_before_any_allocation() {
    let garbage = [0x42u8; 64];
    let err = read_sketch(&garbage[..], &[]).unwrap_err();
    assert!(matches!(err, SketchIoError::BadSentinel { .. }));
}

#[test]
fn test_empty_sketch_round_trips() {
    let mut buf = Vec::new();
    let palette = write_sketch(&mut buf, &[]).unwrap();
    assert!(palette.is_empty());
    let loaded = read_sketch(buf.as_slice(), &palette).unwrap();
    assert!(loaded.is_empty());
}

// Benchmark for time-grid layout computations
// Measures render-state recomputation and column hit-testing

use calendar_timegrid::models::settings::TimeGridSettings;
use calendar_timegrid::models::timezone::TimezoneSpec;
use calendar_timegrid::services::column_layout::{week_columns, ColumnLayout, WeekOptions};
use calendar_timegrid::services::live_clock::ManualTimerDriver;
use calendar_timegrid::services::time_axis::hour_marks;
use calendar_timegrid::TimeGridController;
use chrono::{Duration, FixedOffset, TimeZone};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_refresh(c: &mut Criterion) {
    let utc = FixedOffset::east_opt(0).unwrap();
    let now = utc.with_ymd_and_hms(2025, 1, 7, 12, 0, 0).unwrap();
    let mut group = c.benchmark_group("controller_refresh");

    for zones in [1usize, 3, 8].iter() {
        let timezones = (0..*zones)
            .map(|idx| TimezoneSpec::from_offset_minutes(idx as i32 * 60).unwrap())
            .collect::<Vec<_>>();
        let columns = week_columns(now, &WeekOptions::default()).unwrap();
        let mut grid = TimeGridController::new(
            &TimeGridSettings::default(),
            columns,
            timezones,
            ManualTimerDriver::new(),
            now,
        );

        group.bench_with_input(BenchmarkId::from_parameter(zones), zones, |b, _| {
            let mut minute = 0;
            b.iter(|| {
                minute = (minute + 1) % 1440;
                grid.refresh(black_box(now + Duration::minutes(minute)))
            });
        });
    }

    group.finish();
}

fn bench_hit_testing(c: &mut Criterion) {
    let utc = FixedOffset::east_opt(0).unwrap();
    let now = utc.with_ymd_and_hms(2025, 1, 7, 12, 0, 0).unwrap();
    let layout = ColumnLayout::new(week_columns(now, &WeekOptions::default()).unwrap(), true);

    c.bench_function("column_at", |b| {
        b.iter(|| layout.column_at(black_box(63.5)))
    });
    c.bench_function("hour_marks", |b| {
        b.iter(|| hour_marks(black_box(now)).count())
    });
}

criterion_group!(benches, bench_refresh, bench_hit_testing);
criterion_main!(benches);

#![allow(missing_docs, clippy::unwrap_used)]
use chrono::{Days, TimeZone};
use chrono_tz::Europe::Moscow;
use riseset::{Coordinate, DayState, SolarCalculator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Murmansk, Russia: the largest city above the arctic circle
    let murmansk = Coordinate::new(68.9585, 33.0827)?;
    let calculator = SolarCalculator::new(murmansk);

    println!("Rise/Set Example - Murmansk, Russia");
    println!("Location: 68.95850°N, 33.08270°E");
    println!("{:=<60}", "");

    // Walk the city into its polar night, a few days either side of onset.
    println!("Late autumn 2025, the sun leaving:");
    let onset = Moscow.with_ymd_and_hms(2025, 11, 28, 12, 0, 0).unwrap();
    for day_offset in 0..5 {
        let when = onset
            .checked_add_days(Days::new(day_offset))
            .unwrap()
            .fixed_offset();
        let day = calculator.day(when)?;

        print!("  {}: ", when.format("%B %d"));
        match day.state() {
            DayState::PolarNight => println!("sun never rises (polar night)"),
            DayState::PolarDay => println!("sun never sets (midnight sun)"),
            state => {
                let minutes = day
                    .day_length()
                    .map(|length| length.num_minutes())
                    .unwrap_or(0);
                println!("{state:?}, {minutes} minutes of daylight");
                for event in day.events() {
                    println!(
                        "      {:?} at {} toward {:.1}°",
                        event.kind, event.time, event.azimuth
                    );
                }
            }
        }
    }
    println!();

    // Scan forward out of the darkness.
    let deep_winter = Moscow
        .with_ymd_and_hms(2025, 12, 10, 12, 0, 0)
        .unwrap()
        .fixed_offset();
    match calculator.next_rise(deep_winter)? {
        Some(rise) => println!(
            "First sunrise after the polar night: {}",
            rise.with_timezone(&Moscow).format("%B %d at %H:%M:%S")
        ),
        None => println!("No sunrise within a year of December 10"),
    }
    println!();

    // At midsummer the sun never drops to -4°, so the photographer's band
    // is open at both ends of the day.
    let midsummer = Moscow
        .with_ymd_and_hms(2025, 6, 21, 12, 0, 0)
        .unwrap()
        .fixed_offset();
    let ring = calculator.magic_hour(midsummer)?;
    println!("Midsummer {} spans:", ring.label());
    for track in ring.tracks() {
        println!(
            "  {} -> {}  ({} minutes)",
            track.start.timestamp.format("%H:%M:%S"),
            track.finish.timestamp.format("%H:%M:%S"),
            track.duration().num_minutes()
        );
    }
    println!(
        "Bright daylight before: {} min, darkness after: {} min",
        ring.daylight_before().num_minutes(),
        ring.darkness_after().num_minutes()
    );

    Ok(())
}

//! Human-friendly rendering of the directory table and forecast cards.

use chrono::NaiveDateTime;
use cityscope_core::model::{CityRecord, ForecastEntry};
use cityscope_core::units::{convert_hpa_to_mm_hg, convert_kelvin_to_celsius};

pub fn render_city_table(view: &[&CityRecord]) {
    println!("{:>4}  {:<28} {:<24} {:<24}", "No.", "City Name", "Country", "Timezone");

    for (index, city) in view.iter().enumerate() {
        println!(
            "{:>4}  {:<28} {:<24} {:<24}",
            index + 1,
            city.name,
            city.cou_name_en,
            city.timezone
        );
    }

    println!("({} rows)", view.len());
}

pub fn render_forecast(location: &str, snapshots: &[&ForecastEntry]) {
    println!("Weather Information");
    println!("{location}");
    println!();

    for entry in snapshots {
        render_card(entry);
        println!();
    }
}

fn render_card(entry: &ForecastEntry) {
    println!("{}  {}", format_day(entry.timestamp), entry.description);
    println!(
        "  Min Temp: {}°C  Max Temp: {}°C  Feels Like: {}°C",
        convert_kelvin_to_celsius(entry.temp_min_k),
        convert_kelvin_to_celsius(entry.temp_max_k),
        convert_kelvin_to_celsius(entry.feels_like_k),
    );
    println!(
        "  Humidity: {}%  Pressure: {} mmHg  Temperature: {}°C  Wind Speed: {} m/s",
        entry.humidity_pct,
        convert_hpa_to_mm_hg(entry.pressure_hpa),
        convert_kelvin_to_celsius(entry.temp_k),
        entry.wind_speed_mps,
    );

    if !entry.icon.is_empty() {
        println!("  Icon: {}", entry.icon);
    }
}

fn format_day(timestamp: NaiveDateTime) -> String {
    timestamp.format("%a %Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn format_day_shows_weekday_and_date() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
        assert_eq!(format_day(ts), "Fri 2024-03-01");
    }
}

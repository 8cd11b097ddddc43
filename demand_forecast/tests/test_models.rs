use chrono::{Days, NaiveDate};
use demand_forecast::data::DemandSeries;
use demand_forecast::models::linear_trend::{forecast, LinearTrend};
use demand_forecast::models::{ForecastModel, ForecastSeries, TrainedForecastModel};
use demand_forecast::utils::forecast_accuracy;
use demand_forecast::ForecastError;
use rstest::rstest;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
}

fn series_from(quantities: &[u32]) -> DemandSeries {
    let dates = (0..quantities.len())
        .map(|i| start() + Days::new(i as u64))
        .collect();
    DemandSeries::from_parts(dates, quantities.to_vec()).unwrap()
}

#[test]
fn test_perfect_line_regression() {
    let data = series_from(&[10, 20, 30]);

    let (projection, model) = forecast(&data, 1).unwrap();

    assert_eq!(model.slope, 10.0);
    assert_eq!(model.intercept, 10.0);
    assert_eq!(projection.horizons(), 1);
    assert_eq!(projection.points()[0].date, start() + Days::new(3));
    assert_eq!(projection.points()[0].predicted_quantity, 40);
}

#[rstest]
#[case(1)]
#[case(7)]
#[case(90)]
fn test_forecast_is_contiguous_run(#[case] horizon: usize) {
    let data = series_from(&[100, 104, 99, 110, 120, 118]);

    let (projection, _) = forecast(&data, horizon).unwrap();

    assert_eq!(projection.horizons(), horizon);
    let mut expected = data.last_date().unwrap();
    for point in projection.points() {
        expected = expected + Days::new(1);
        assert_eq!(point.date, expected);
    }
}

#[test]
fn test_forecast_floors_at_zero() {
    let data = series_from(&[50, 40, 30, 20, 10]);

    let (projection, model) = forecast(&data, 10).unwrap();

    assert_eq!(model.slope, -10.0);
    assert_eq!(projection.values(), vec![0; 10]);
}

#[test]
fn test_gaps_use_elapsed_days() {
    // Observations on day 0 and day 4 only
    let dates = vec![start(), start() + Days::new(4)];
    let data = DemandSeries::from_parts(dates, vec![0, 8]).unwrap();

    let (projection, model) = forecast(&data, 2).unwrap();

    assert_eq!(model.slope, 2.0);
    assert_eq!(model.intercept, 0.0);
    // Days 5 and 6
    assert_eq!(projection.values(), vec![10, 12]);
}

#[rstest]
#[case(vec![])]
#[case(vec![42])]
fn test_insufficient_data(#[case] quantities: Vec<u32>) {
    let data = series_from(&quantities);
    let result = forecast(&data, 5);
    assert!(matches!(result, Err(ForecastError::InsufficientData(_))));
}

#[test]
fn test_zero_horizon_rejected() {
    let data = series_from(&[1, 2, 3]);
    assert!(matches!(
        forecast(&data, 0),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn test_forecast_is_idempotent() {
    let data = series_from(&[13, 17, 12, 25, 19, 30, 28]);

    let first = forecast(&data, 14).unwrap();
    let second = forecast(&data, 14).unwrap();

    assert_eq!(first.0, second.0);
    assert_eq!(first.1.slope.to_bits(), second.1.slope.to_bits());
    assert_eq!(first.1.intercept.to_bits(), second.1.intercept.to_bits());
}

#[test]
fn test_trained_model_predict() {
    let data = series_from(&[10, 20, 30, 40]);
    let model = LinearTrend::new();

    let trained = model.train(&data).unwrap();
    assert_eq!(trained.name(), "Linear Trend");
    assert_eq!(trained.first_date(), start());
    assert_eq!(trained.last_date(), start() + Days::new(3));

    let fitted = trained.predict(&data).unwrap();
    assert_eq!(fitted, vec![10.0, 20.0, 30.0, 40.0]);

    let accuracy = forecast_accuracy(&fitted, &data.quantities_f64()).unwrap();
    assert_eq!(accuracy.rmse, 0.0);

    let projection = trained.forecast(2).unwrap();
    assert_eq!(projection.values(), vec![50, 60]);
}

#[test]
fn test_forecast_dataframe_export() {
    let data = series_from(&[10, 20, 30]);
    let (projection, _) = forecast(&data, 3).unwrap();

    let df = projection.to_dataframe().unwrap();

    assert_eq!(df.height(), 3);
    assert_eq!(df.get_column_names(), vec!["date", "predicted_quantity"]);
}

#[test]
fn test_projection_beyond_quantity_range_is_rejected() {
    let data = series_from(&[0, u32::MAX]);

    let result = forecast(&data, 3);

    assert!(matches!(result, Err(ForecastError::DataError(_))));
}

#[test]
fn test_forecast_json_round_trip_validates() {
    let data = series_from(&[10, 20, 30]);
    let (projection, _) = forecast(&data, 2).unwrap();

    let json = serde_json::to_string(&projection).unwrap();
    assert_eq!(
        json,
        r#"[{"date":"2023-01-04","predicted_quantity":40},{"date":"2023-01-05","predicted_quantity":50}]"#
    );
    let back: ForecastSeries = serde_json::from_str(&json).unwrap();
    assert_eq!(back, projection);

    let out_of_order = r#"[{"date":"2024-01-05","predicted_quantity":1},{"date":"2024-01-01","predicted_quantity":2}]"#;
    assert!(serde_json::from_str::<ForecastSeries>(out_of_order).is_err());

    let gap = r#"[{"date":"2024-01-01","predicted_quantity":1},{"date":"2024-01-03","predicted_quantity":2}]"#;
    assert!(serde_json::from_str::<ForecastSeries>(gap).is_err());
}

//! Integration tests for module exports.
//!
//! Verify that the public modules and types are reachable through both
//! their full paths and the module-level re-exports.

use std::sync::Arc;

/// Test that types module is accessible via absolute path.
#[test]
fn test_types_module_exports() {
    use pricer_core::types::time::Date;
    use pricer_core::types::time::DayCountConvention;

    let start = Date::from_ymd(2021, 2, 24).unwrap();
    let end = start.add_months(3).unwrap();

    let yf = DayCountConvention::ActualActual365.year_fraction_dates(start, end);
    assert!((yf - 89.0 / 365.0).abs() < 1e-15);
    assert!(DayCountConvention::ActualActual365.year_fraction_dates(end, start) < 0.0);
}

/// Test that types re-exports work at module level.
#[test]
fn test_types_reexports() {
    use pricer_core::types::{Date, DateError, DayCountConvention, InterpolationError, PricingError};

    let _date = Date::from_ymd(2024, 6, 15).unwrap();
    let _dcc = DayCountConvention::Thirty360;
    let _err = PricingError::InvalidInput("test".to_string());
    let _date_err = DateError::ParseError("test".to_string());
    let _interp_err = InterpolationError::InsufficientData { got: 1, need: 2 };
}

/// Test that the interpolation module is correctly structured.
#[test]
fn test_math_module_structure() {
    use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};

    let interp = LinearInterpolator::new(&[0.0, 1.0], &[1.0, 3.0]).unwrap();
    assert_eq!(interp.interpolate(0.5).unwrap(), 2.0);
}

/// Test that market data re-exports and bundles work across module paths.
#[test]
fn test_market_data_exports() {
    use pricer_core::market_data::curves::ZeroCurve;
    use pricer_core::market_data::surfaces::BlackVarianceCurve;
    use pricer_core::market_data::{
        BlackVolTermStructure, MarketDataError, TermStructure, YieldTermStructure,
    };
    use pricer_core::types::{Date, DayCountConvention};

    let today = Date::from_ymd(2021, 2, 24).unwrap();
    let dc = DayCountConvention::ActualActual365;

    let rates: Arc<dyn YieldTermStructure> = Arc::new(
        ZeroCurve::new(today, &[today, today.add_months(6).unwrap()], &[0.01, 0.015], dc).unwrap(),
    );
    let vols: Arc<dyn BlackVolTermStructure> = Arc::new(
        BlackVarianceCurve::new(
            today,
            &[today.add_months(3).unwrap(), today.add_months(6).unwrap()],
            &[0.20, 0.25],
            dc,
        )
        .unwrap(),
    );

    assert_eq!(rates.reference_date(), vols.reference_date());
    let t = vols.time_from_reference(today.add_months(3).unwrap());
    assert!((vols.volatility(40.0, t).unwrap() - 0.20).abs() < 1e-12);
    assert!(rates.discount_factor(t).unwrap() < 1.0);

    let err: MarketDataError = BlackVarianceCurve::new(today, &[], &[], dc).unwrap_err();
    assert!(!err.to_string().is_empty());
}

/// Test that all DayCountConvention variants are accessible.
#[test]
fn test_day_count_convention_variants() {
    use pricer_core::types::time::DayCountConvention;

    let conventions = [
        DayCountConvention::ActualActual365,
        DayCountConvention::ActualActual360,
        DayCountConvention::Thirty360,
    ];

    for conv in &conventions {
        assert_eq!(conv.name().parse::<DayCountConvention>(), Ok(*conv));
    }
}

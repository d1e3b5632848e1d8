pub mod street_metrics;

//! Unit tests for configuration building, validation, and loading.

#[cfg(test)]
mod helpers {
    use qn_core::Capacity;

    use crate::NetworkConfigBuilder;

    pub fn series3() -> NetworkConfigBuilder {
        NetworkConfigBuilder::single_class(
            1.0,
            vec![1.5, 1.5, 2.0],
            vec![1, 1, 1],
            vec![
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0],
                vec![0.0, 0.0, 0.0],
            ],
            100.0,
            Some(vec![Capacity::Finite(5), Capacity::Finite(10), Capacity::Unbounded]),
        )
    }
}

#[cfg(test)]
mod builder_tests {
    use qn_core::{Capacity, ClassId, StationId};

    use super::helpers::series3;
    use crate::NetworkConfigBuilder;

    #[test]
    fn single_class_shortcut() {
        let config = series3().build().unwrap();
        assert_eq!(config.num_stations(), 3);
        assert_eq!(config.num_classes(), 1);
        assert_eq!(config.class_name(ClassId::DEFAULT), "default");
        assert_eq!(config.arrival_probabilities(), vec![1.0]);
        assert_eq!(config.capacities()[0], Capacity::Finite(5));
        assert_eq!(config.service_rate(ClassId(0), StationId(2)), 2.0);
        assert_eq!(config.routing_row(ClassId(0), StationId(0)), &[0.0, 1.0, 0.0]);
        assert_eq!(config.entry_station(), StationId(0));
        assert!(!config.all_unbounded());
    }

    #[test]
    fn single_class_default_capacities_unbounded() {
        let config = NetworkConfigBuilder::single_class(0.8, vec![1.0], vec![1], vec![vec![0.0]], 10.0, None)
            .build()
            .unwrap();
        assert!(config.all_unbounded());
    }

    #[test]
    fn class_lookup_by_name() {
        let config = NetworkConfigBuilder::new(10.0)
            .station(1, Capacity::Unbounded)
            .class("a", 0.25, vec![vec![0.0]], vec![1.0])
            .class("b", 0.75, vec![vec![0.0]], vec![2.0])
            .build()
            .unwrap();
        assert_eq!(config.class_id("b").unwrap(), ClassId(1));
        assert!(config.class_id("c").is_err());
        assert_eq!(config.station_service_rates(StationId(0)), vec![1.0, 2.0]);
    }

    #[test]
    fn with_seed_changes_only_seed() {
        let config = series3().seed(1).build().unwrap();
        let other = config.with_seed(2);
        assert_eq!(other.seed, 2);
        assert_eq!(other.stations, config.stations);
    }

    #[test]
    fn summary_mentions_every_station() {
        let text = series3().build().unwrap().to_string();
        assert!(text.contains("3 station(s)"));
        assert!(text.contains("station 2: 1 server(s), capacity=inf"));
        assert!(text.contains("class default: 100.0% of arrivals"));
    }
}

#[cfg(test)]
mod validation_tests {
    use qn_core::Capacity;

    use super::helpers::series3;
    use crate::{ConfigError, NetworkConfigBuilder};

    fn one_station() -> NetworkConfigBuilder {
        NetworkConfigBuilder::new(10.0).station(1, Capacity::Unbounded)
    }

    #[test]
    fn rejects_no_stations() {
        let err = NetworkConfigBuilder::new(10.0)
            .class("a", 1.0, vec![], vec![])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NoStations));
    }

    #[test]
    fn rejects_zero_servers() {
        let err = NetworkConfigBuilder::new(10.0)
            .station(0, Capacity::Unbounded)
            .class("a", 1.0, vec![vec![0.0]], vec![1.0])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NoServers { station: 0 }));
    }

    #[test]
    fn rejects_zero_capacity() {
        let err = NetworkConfigBuilder::new(10.0)
            .station(1, Capacity::Finite(0))
            .class("a", 1.0, vec![vec![0.0]], vec![1.0])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroCapacity { station: 0 }));
    }

    #[test]
    fn rejects_no_classes() {
        let err = one_station().build().unwrap_err();
        assert!(matches!(err, ConfigError::NoClasses));
    }

    #[test]
    fn rejects_duplicate_class() {
        let err = one_station()
            .class("a", 0.5, vec![vec![0.0]], vec![1.0])
            .class("a", 0.5, vec![vec![0.0]], vec![1.0])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateClass(ref n) if n == "a"));
    }

    #[test]
    fn rejects_probabilities_not_summing_to_one() {
        let err = one_station()
            .class("a", 0.5, vec![vec![0.0]], vec![1.0])
            .class("b", 0.4, vec![vec![0.0]], vec![1.0])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ProbabilitySum(_)));
    }

    #[test]
    fn accepts_probability_sum_within_tolerance() {
        one_station()
            .class("a", 0.3333333, vec![vec![0.0]], vec![1.0])
            .class("b", 0.6666667, vec![vec![0.0]], vec![1.0])
            .build()
            .unwrap();
    }

    #[test]
    fn rejects_probability_out_of_range() {
        let err = one_station()
            .class("a", 1.5, vec![vec![0.0]], vec![1.0])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ArrivalProbability { .. }));
    }

    #[test]
    fn rejects_wrong_routing_shape() {
        let err = one_station()
            .class("a", 1.0, vec![vec![0.0], vec![0.0]], vec![1.0])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::RoutingRows { expected: 1, got: 2, .. }));

        let err = one_station()
            .class("a", 1.0, vec![vec![0.0, 0.0]], vec![1.0])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::RoutingColumns { row: 0, expected: 1, got: 2, .. }));
    }

    #[test]
    fn rejects_negative_routing_entry() {
        let err = one_station()
            .class("a", 1.0, vec![vec![-0.1]], vec![1.0])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::RoutingEntry { row: 0, col: 0, .. }));
    }

    #[test]
    fn rejects_row_sum_above_one() {
        let err = NetworkConfigBuilder::new(10.0)
            .station(1, Capacity::Unbounded)
            .station(1, Capacity::Unbounded)
            .class("a", 1.0, vec![vec![0.6, 0.6], vec![0.0, 0.0]], vec![1.0, 1.0])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::RoutingRowSum { row: 0, .. }));
    }

    #[test]
    fn accepts_row_sum_within_tolerance() {
        NetworkConfigBuilder::new(10.0)
            .station(1, Capacity::Unbounded)
            .station(1, Capacity::Unbounded)
            .class("a", 1.0, vec![vec![0.5, 0.5000005], vec![0.0, 0.0]], vec![1.0, 1.0])
            .build()
            .unwrap();
    }

    #[test]
    fn rejects_bad_service_rates() {
        let err = one_station()
            .class("a", 1.0, vec![vec![0.0]], vec![])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ServiceRateCount { expected: 1, got: 0, .. }));

        let err = one_station()
            .class("a", 1.0, vec![vec![0.0]], vec![0.0])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ServiceRate { station: 0, .. }));
    }

    #[test]
    fn rejects_bad_arrivals() {
        let err = series3().arrivals(0.0, 0).build().unwrap_err();
        assert!(matches!(err, ConfigError::ArrivalRate(_)));

        let err = series3().arrivals(1.0, 3).build().unwrap_err();
        assert!(matches!(err, ConfigError::EntryStation { entry: 3, max: 2 }));
    }

    #[test]
    fn rejects_bad_horizon() {
        let err = NetworkConfigBuilder::single_class(1.0, vec![1.0], vec![1], vec![vec![0.0]], -5.0, None)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Horizon(_)));
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = one_station()
            .class("express", 1.0, vec![vec![0.0]], vec![-2.0])
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "class \"express\": service_rates[0] must be positive, got -2"
        );
    }
}

#[cfg(test)]
mod loader_tests {
    use std::io::Cursor;

    use qn_core::{Capacity, ClassId, StationId};

    use crate::{ConfigError, load_config_json, load_config_reader};

    const TWO_CLASS_JSON: &str = r#"{
        "horizon": 500.0,
        "seed": 7,
        "stations": [
            { "servers": 1, "capacity": "inf" },
            { "servers": 2, "capacity": 4 }
        ],
        "classes": [
            { "name": "urgent", "arrival_probability": 0.3,
              "routing": [[0.0, 0.5], [0.0, 0.0]], "service_rates": [3.0, 2.0] },
            { "name": "routine", "arrival_probability": 0.7,
              "routing": [[0.0, 1.0], [0.0, 0.0]], "service_rates": [2.0, 1.0] }
        ],
        "arrivals": { "external_rate": 1.2, "entry_station": 0 }
    }"#;

    #[test]
    fn loads_two_class_network() {
        let config = load_config_reader(Cursor::new(TWO_CLASS_JSON)).unwrap();
        assert_eq!(config.horizon, 500.0);
        assert_eq!(config.seed, 7);
        assert_eq!(config.capacities(), vec![Capacity::Unbounded, Capacity::Finite(4)]);
        assert_eq!(config.class_id("routine").unwrap(), ClassId(1));
        assert_eq!(config.routing_row(ClassId(0), StationId(0)), &[0.0, 0.5]);
        assert_eq!(config.external_rate(), 1.2);
    }

    #[test]
    fn defaults_seed_capacity_and_entry() {
        let json = r#"{
            "horizon": 10.0,
            "stations": [ { "servers": 1 } ],
            "classes": [ { "name": "x", "arrival_probability": 1.0,
                           "routing": [[0.0]], "service_rates": [1.0] } ],
            "arrivals": { "external_rate": 0.5 }
        }"#;
        let config = load_config_reader(Cursor::new(json)).unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.stations[0].capacity, Capacity::Unbounded);
        assert_eq!(config.entry_station(), StationId(0));
    }

    #[test]
    fn invalid_capacity_string_is_parse_error() {
        let json = TWO_CLASS_JSON.replace("\"inf\"", "\"lots\"");
        let err = load_config_reader(Cursor::new(json)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loaded_config_is_validated() {
        let json = TWO_CLASS_JSON.replace("0.7", "0.6");
        let err = load_config_reader(Cursor::new(json)).unwrap_err();
        assert!(matches!(err, ConfigError::ProbabilitySum(_)));
    }

    #[test]
    fn serializes_back_to_equivalent_json() {
        let config = load_config_reader(Cursor::new(TWO_CLASS_JSON)).unwrap();
        let text = serde_json::to_string(&config).unwrap();
        assert!(text.contains("\"capacity\":\"inf\""));
        assert!(text.contains("\"capacity\":4"));
        let again = load_config_reader(Cursor::new(text)).unwrap();
        assert_eq!(again, config);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config_json(std::path::Path::new("/nonexistent/qn.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

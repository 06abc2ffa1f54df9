//! Console tables.

use qn_config::NetworkConfig;
use qn_core::ClassId;
use qn_stats::{Metrics, NetworkMetrics, theory};

fn opt(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_owned(), |r| format!("{r:.3}"))
}

fn row(label: &str, m: &Metrics) {
    println!(
        "{:<10} {:>6} {:>8.3} {:>8.3} {:>8.3} {:>8.3} {:>8.3} {:>8.3} {:>7.3} {:>7.3} {:>6} {:>7.3} {:>7} {:>7}",
        label,
        m.served,
        m.mean_waiting_time,
        m.mean_service_time,
        m.mean_system_time,
        m.mean_waiting,
        m.mean_in_system,
        m.mean_in_service,
        m.utilization,
        m.throughput,
        m.rejected,
        m.loss_probability,
        opt(m.little.l_ratio),
        opt(m.little.lq_ratio),
    );
}

/// Print the metrics table of one run, with per-class rows for multi-class
/// networks and Jackson references where they apply.
pub fn print_metrics(name: &str, config: &NetworkConfig, metrics: &NetworkMetrics) {
    println!("=== {name} ===");
    println!(
        "external arrivals: {}  |  rejected: {} ({:.2}%)  |  exits: {}  |  last event: {:.3}",
        metrics.external_arrivals,
        metrics.rejected,
        100.0 * metrics.network_loss_probability(),
        metrics.exits,
        metrics.end_time.as_f64(),
    );
    println!();
    println!(
        "{:<10} {:>6} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>7} {:>7} {:>6} {:>7} {:>7} {:>7}",
        "station", "served", "Wq", "Ws", "W", "Lq", "L", "Ls", "rho", "lam_eff", "lost", "P_loss", "L/lW", "Lq/lWq"
    );
    println!("{}", "-".repeat(118));
    for st in &metrics.stations {
        row(&format!("{} ({}c)", st.station.0, st.servers), &st.aggregate);
        if config.num_classes() > 1 {
            for (k, m) in st.classes.iter().enumerate() {
                row(&format!("  {}", config.class_name(ClassId(k as u16))), m);
            }
        }
    }
    println!();

    if config.num_classes() > 1 {
        print_class_ledger(config, metrics);
    } else {
        print_reference(config, metrics);
    }
}

fn print_class_ledger(config: &NetworkConfig, metrics: &NetworkMetrics) {
    println!("{:<10} {:<12} {:>8} {:>8} {:>8} {:>8}", "station", "class", "arrivals", "accepted", "rejected", "lam_eff");
    for st in &metrics.stations {
        for class in config.class_ids() {
            let Some(m) = st.class(class) else { continue };
            println!(
                "{:<10} {:<12} {:>8} {:>8} {:>8} {:>8.4}",
                st.station.0,
                config.class_name(class),
                m.arrivals,
                m.accepted,
                m.rejected,
                m.throughput,
            );
        }
    }
    println!();
}

fn print_reference(config: &NetworkConfig, metrics: &NetworkMetrics) {
    let references = match theory::open_jackson(config) {
        Ok(r) => r,
        Err(e) => {
            println!("no analytic reference: {e}");
            println!();
            return;
        }
    };
    let approximate = !config.all_unbounded();
    println!(
        "analytic reference{}:",
        if approximate { " (M/M/c/K per station, approximate)" } else { " (Jackson)" }
    );
    println!("{:<10} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}", "station", "lambda", "rho", "L", "sim L", "W", "sim W");
    for (st, r) in metrics.stations.iter().zip(&references) {
        println!(
            "{:<10} {:>8.3} {:>8.3} {:>8.3} {:>8.3} {:>8.3} {:>8.3}",
            st.station.0,
            r.arrival_rate,
            r.utilization,
            r.l,
            st.aggregate.mean_in_system,
            r.w,
            st.aggregate.mean_system_time,
        );
    }
    println!();
}

/// Mean and sample standard deviation of `values`.
fn mean_sd(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let mean = values.iter().sum::<f64>() / n;
    if values.len() < 2 {
        return (mean, 0.0);
    }
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, var.sqrt())
}

/// Print per-station means across independent replications.
pub fn print_replications(name: &str, runs: &[NetworkMetrics]) {
    println!("=== {name}: {} replications ===", runs.len());
    println!(
        "{:<10} {:>16} {:>16} {:>16} {:>16}",
        "station", "W (sd)", "L (sd)", "rho (sd)", "P_loss (sd)"
    );
    let stations = runs.first().map_or(0, |m| m.stations.len());
    for s in 0..stations {
        let pick = |f: fn(&Metrics) -> f64| -> (f64, f64) {
            let values: Vec<f64> = runs.iter().map(|m| f(&m.stations[s].aggregate)).collect();
            mean_sd(&values)
        };
        let cell = |(m, sd): (f64, f64)| format!("{m:.3} ({sd:.3})");
        println!(
            "{:<10} {:>16} {:>16} {:>16} {:>16}",
            s,
            cell(pick(|m| m.mean_system_time)),
            cell(pick(|m| m.mean_in_system)),
            cell(pick(|m| m.utilization)),
            cell(pick(|m| m.loss_probability)),
        );
    }
    println!();
}

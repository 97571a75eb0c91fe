use anyhow::{Context, Result};
use clap::Parser;
use courier_dispatch::{DeliverySystem, DispatchError, Settings};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Dispatch pending deliveries from the warehouse to courier zones
#[derive(Debug, Parser)]
#[command(name = "courier_dispatch", version, about)]
struct Cli {
    /// Settings file (JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Scenario file with appointments and couriers (JSON)
    #[arg(short, long, value_name = "FILE")]
    scenario: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset
    #[arg(short, long, default_value = "info",
          value_parser = ["trace", "debug", "info", "warn", "error"])]
    log_level: String,

    /// Print results as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Scenario {
    appointments: Vec<AppointmentRequest>,
    couriers: Vec<CourierRequest>,
}

#[derive(Debug, Deserialize)]
struct AppointmentRequest {
    customer: String,
    address: String,
    time: String,
    priority: i32,
    zone: String,
}

#[derive(Debug, Deserialize)]
struct CourierRequest {
    name: String,
    zone: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let rate = settings.price_per_km;
    let mut system = DeliverySystem::new(settings).context("failed to build delivery system")?;

    if let Some(path) = &cli.scenario {
        let json_str = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        let scenario: Scenario = serde_json::from_str(&json_str)
            .with_context(|| format!("failed to parse scenario {}", path.display()))?;
        load_scenario(&mut system, scenario);
    }

    if cli.json {
        return print_json(&mut system);
    }

    println!("Routing graph:");
    print!("{}", system.routing_graph());

    println!("\nAppointments:");
    for appointment in system.appointments() {
        println!(
            "  #{} {} ({}) at {} priority {} in {} [{}]",
            appointment.id,
            appointment.customer,
            appointment.address,
            appointment.delivery_time,
            appointment.priority,
            appointment.zone,
            appointment.status()
        );
    }

    let plan = system.optimize_all();
    println!("\nBatch preview ({} deliveries):", plan.len());
    for delivery in &plan.deliveries {
        println!(
            "  Delivery #{} to {}: {:.2} km",
            delivery.appointment_id, delivery.zone, delivery.route.distance
        );
    }
    println!("  Total distance: {:.2} km", plan.total_distance);
    println!("  Estimated total cost: ${:.2}", plan.estimated_cost(rate));

    println!("\nDispatching:");
    loop {
        match system.dispatch_next() {
            Ok(dispatch) => {
                println!(
                    "  Appointment #{} -> {} (ID: {})",
                    dispatch.appointment.id, dispatch.courier.name, dispatch.courier.id
                );
                if dispatch.route.is_unreachable() {
                    println!("    No route to {}", dispatch.appointment.zone);
                } else {
                    println!(
                        "    Route: {}",
                        system.routing_graph().describe_path(&dispatch.route.path)
                    );
                    println!(
                        "    Distance: {:.2} km, estimated cost: ${:.2}",
                        dispatch.route.distance,
                        dispatch.estimated_price(rate)
                    );
                }
            }
            Err(e) if e.is_precondition() => {
                println!("  {}", e);
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!("\nCouriers:");
    for courier in system.couriers() {
        println!(
            "  {} {} in {} [{}] load {}/{}",
            courier.id,
            courier.name,
            courier.zone,
            if courier.available { "Available" } else { "Busy" },
            courier.load,
            courier.max_load
        );
    }

    Ok(())
}

fn load_scenario(system: &mut DeliverySystem, scenario: Scenario) {
    for request in scenario.appointments {
        system.add_appointment(
            &request.customer,
            &request.address,
            &request.time,
            request.priority,
            &request.zone,
        );
    }
    for request in scenario.couriers {
        if let Err(e) = system.add_courier(&request.name, &request.zone) {
            warn!(name = %request.name, "courier skipped: {}", e);
        }
    }
    info!(
        appointments = system.registry().count(),
        couriers = system.pool().len(),
        "scenario loaded"
    );
}

fn print_json(system: &mut DeliverySystem) -> Result<()> {
    let plan = system.optimize_all();
    let mut dispatches = Vec::new();
    let stop_reason = loop {
        match system.dispatch_next() {
            Ok(dispatch) => dispatches.push(dispatch),
            Err(e @ (DispatchError::NothingPending | DispatchError::NoCourierAvailable { .. })) => {
                break e.to_string()
            }
            Err(e) => return Err(e.into()),
        }
    };

    let output = serde_json::json!({
        "graph": system.show_routing_graph(),
        "plan": plan,
        "dispatches": dispatches,
        "stopped": stop_reason,
        "couriers": system.couriers().collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn init_logging(log_level: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("failed to initialize logging")?;
    Ok(())
}

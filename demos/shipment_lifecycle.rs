//! Shipment Lifecycle
//!
//! This example walks one parcel through registration, edits, undo/redo and
//! delivery, then saves and restores it from a checkpoint.
//!
//! Key concepts:
//! - Accumulated validation errors on registration
//! - One undoable timeline for field edits and status changes
//! - Discounts and estimates derived from current values
//! - Checkpoints that keep the full history
//!
//! Run with: cargo run --example shipment_lifecycle

use waybill::builder::ShipmentDraft;
use waybill::checkpoint::Checkpoint;
use waybill::core::ShipmentKind;
use waybill::report::render_summary;
use waybill::{load_config_file, logging, Repository, ShipmentError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_file("waybill.toml")?.unwrap_or_default();
    if let Err(e) = logging::init(&config.logging.filter) {
        eprintln!("logging disabled: {e}");
    }

    let repository = Repository::new(config);

    println!("=== Registration ===");
    let rejected = ShipmentDraft::builder()
        .kind(ShipmentKind::Express)
        .sender("")
        .recipient("Luis Pardo")
        .origin("Av. Central 100")
        .destination("Calle 9 #12")
        .weight_kg(2000.0)
        .build()?;
    match repository.create(rejected) {
        Err(ShipmentError::Validation(violations)) => {
            println!("Rejected with {} problem(s):", violations.len());
            for violation in violations.iter() {
                println!("  - {violation}");
            }
        }
        other => println!("Unexpected: {other:?}"),
    }

    let draft = ShipmentDraft::builder()
        .kind(ShipmentKind::Standard)
        .sender("Ana Torres")
        .recipient("Luis Pardo")
        .origin("Av. Central 100")
        .destination("Calle 9 #12, Barrio Norte")
        .weight_kg(2.0)
        .description("books")
        .build()?;
    let shipment = repository.create(draft)?;
    let id = shipment.id();
    println!("Registered {shipment}");
    println!("Quoted cost: {:.2}", shipment.cost());

    println!("\n=== Edits ===");
    repository.modify_field(id, "weight", "65")?;
    println!("Discount at 65 kg: {:.2}", repository.discount(id)?.discount);
    repository.undo(id)?;
    println!("After undo weight is {} kg", repository.get(id)?.weight_kg());
    repository.redo(id)?;
    println!("After redo weight is {} kg", repository.get(id)?.weight_kg());

    if let Err(e) = repository.modify_field(id, "status", "Delivered") {
        println!("Refused: {e} [{}]", e.kind().code());
    }

    println!("\n=== Lifecycle ===");
    repository.advance(id)?;
    repository.advance(id)?;
    println!("Now {}", repository.get(id)?.status().description());

    let checkpoint = repository.checkpoint(id)?;
    let json = checkpoint.to_json()?;
    println!("Checkpoint {} ({} bytes of JSON)", checkpoint.id, json.len());

    repository.cancel(id)?;
    println!("Cancelled; advance now fails: {:?}", repository.advance(id).err());

    repository.restore(Checkpoint::from_json(&json)?)?;
    println!(
        "Restored from checkpoint: {}",
        repository.get(id)?.status().description()
    );
    repository.advance(id)?;
    repository.advance(id)?;

    println!("\n=== History ===");
    let history = repository.history(id)?;
    for entry in &history.entries {
        let marker = if entry.sequence == history.cursor { ">" } else { " " };
        println!("{marker} {:>2}. {}", entry.sequence, entry.description);
    }

    println!("\n=== Report ===");
    print!("{}", repository.report(id)?);

    println!("\n=== Fleet ===");
    print!("{}", render_summary(&repository.summary()));

    Ok(())
}

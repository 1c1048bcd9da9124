use std::error::Error;

use crate::core::config::data::{path_display, Config};
use crate::deck::catalog::load_catalog;
use crate::deck::verify::{verify_catalog, verify_major_images};

pub fn run_verify(
    config: &Config,
    check_images: bool,
    majors: Option<u32>,
) -> Result<(), Box<dyn Error>> {
    let catalog_file = config.catalog_file();
    let records = load_catalog(&catalog_file)?;
    let image_dir = config.image_dir();

    let mut problems = verify_catalog(
        &records,
        config.first_id(),
        &config.asset_root(),
        check_images.then_some(image_dir.as_path()),
    );

    println!(
        "Minor Arcana in {}: {}",
        path_display(&catalog_file),
        records.len()
    );

    if let Some(count) = majors {
        let majors_dir = config.majors_output_dir();
        problems.extend(verify_major_images(&majors_dir, count));
        println!("Major Arcana images expected in {}: {}", path_display(&majors_dir), count);
        println!("Total deck size: {}", records.len() + count as usize);
    }

    if problems.is_empty() {
        match majors {
            Some(_) => println!("VERIFICATION SUCCESS: Deck is complete."),
            None => println!("VERIFICATION SUCCESS: Minor Arcana is complete."),
        }
        return Ok(());
    }

    for problem in &problems {
        eprintln!("  • {problem}");
    }
    Err(format!(
        "VERIFICATION FAILED: {} problem(s) in {}",
        problems.len(),
        path_display(&catalog_file)
    )
    .into())
}

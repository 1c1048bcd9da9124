use crate::core::config::data::{path_display, Config};

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        println!("  input-file: {}", path_display(self.input_file()));
        println!("  image-dir: {}", path_display(self.image_dir()));
        println!("  catalog-file: {}", path_display(self.catalog_file()));
        println!("  asset-root: {}", self.asset_root());
        println!("  first-id: {}", self.first_id());
        println!("  payload-min-len: {}", self.payload_min_len());
        println!("  label-field: {}", self.label_field());
        println!("  description-field: {}", self.description_field());
        println!(
            "  card-back: {} -> {} ({})",
            path_display(self.card_back_source()),
            path_display(self.card_back_output()),
            self.card_back_export_name()
        );
        println!(
            "  majors: {} -> {}",
            path_display(self.majors_source_dir()),
            path_display(self.majors_output_dir())
        );
    }
}

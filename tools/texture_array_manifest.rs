use byte_unit::{Byte, UnitType};
use clap::Parser;

use bevy_texture_array::{
    TextureArrayData,
    TextureArrayIoError,
    io::writer::write_texture_array_to_file,
};


#[derive(Debug, Parser)]
#[command(about = "write a texture array manifest from slice image references", version, long_about = None)]
struct TextureArrayManifest {
    /// Reference of the base texture asset.
    #[arg(long, default_value = "")]
    base: String,

    /// Images per mip level; a single level lists slices with their own mip chains.
    #[arg(long, default_value = "1")]
    slices: u32,

    /// Output path, `.texarray.json` or `.texarray`.
    #[arg(long)]
    output: String,

    /// Slice image references, level-major.
    images: Vec<String>,
}


fn main() -> Result<(), TextureArrayIoError> {
    let args = TextureArrayManifest::parse();

    let data = TextureArrayData::from_references(args.base, args.slices, args.images);
    println!(
        "writing {} levels x {} slices to `{}`",
        data.level_count(),
        data.slice,
        args.output,
    );

    write_texture_array_to_file(&data, &args.output)?;

    let output_bytes = Byte::from_u64(std::fs::metadata(&args.output)?.len());
    println!(
        "output file size: {}",
        output_bytes.get_appropriate_unit(UnitType::Decimal)
    );

    Ok(())
}

use bevy_texture_array::{
    TextureArrayData,
    TextureArrayIoError,
    io::writer::encode_for_path,
};

#[cfg(feature = "io_flexbuffers")]
use bevy_texture_array::io::codec::TextureArrayCodec;


fn sample_data() -> TextureArrayData {
    TextureArrayData::from_references(
        "base_texture",
        2,
        ["grass_0.png", "dirt_0.png", "grass_1.png", "dirt_1.png"]
            .into_iter()
            .map(String::from),
    )
}


#[cfg(feature = "io_flexbuffers")]
#[test]
fn test_codec() {
    let data = sample_data();
    let encoded = data.encode().unwrap();
    let decoded = TextureArrayData::decode(encoded.as_slice()).unwrap();

    assert_eq!(data, decoded);
}

#[cfg(feature = "io_json")]
#[test]
fn test_json_manifest() {
    let json = br#"{
        "base": "terrain",
        "slice": 2,
        "mipmaps": [["a.png", "b.png"], ["a_1.png", "b_1.png"]]
    }"#;

    let data = TextureArrayData::from_json(json).unwrap();
    assert_eq!(data.slice, 2);
    assert_eq!(data.level_count(), 2);

    let source = data.placeholder_source(|level, slice, reference| (level, slice, reference.to_string()));
    assert_eq!(source[1][0], (1, 0, "a_1.png".to_string()));
}

#[cfg(feature = "io_json")]
#[test]
fn test_json_rejects_short_level() {
    let json = br#"{ "base": "", "slice": 3, "mipmaps": [["a.png", "b.png"]] }"#;

    assert!(matches!(
        TextureArrayData::from_json(json),
        Err(TextureArrayIoError::SliceCountMismatch { level: 0, expected: 3, found: 2 }),
    ));
}

#[test]
fn test_unknown_extension_is_rejected() {
    let result = encode_for_path(&sample_data(), std::path::Path::new("terrain.png"));

    assert!(matches!(result, Err(TextureArrayIoError::UnsupportedExtension(_))));
}

#[cfg(feature = "io_json")]
#[test]
fn test_write_json_manifest() {
    let path = std::env::temp_dir().join("bevy_texture_array_test.texarray.json");
    let data = sample_data();

    bevy_texture_array::io::writer::write_texture_array_to_file(&data, &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(TextureArrayData::from_json(&bytes).unwrap(), data);
}

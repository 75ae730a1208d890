use super::helpers::*;
use crate::*;
use format::{crc32, FormatError, HEADER_BYTES};

/// Overwrites an i32 header field and recomputes nothing.
fn set_i32(bytes: &mut [u8], offset: usize, value: i32) {
    bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// Re-seals the payload CRC after tampering with the payload.
fn reseal(bytes: &mut [u8]) {
    let crc = crc32(&bytes[HEADER_BYTES..]);
    bytes[28..32].copy_from_slice(&crc.to_le_bytes());
}

#[test]
fn load_round_trip() {
    let stars = synthetic_sky(500, 7);
    let catalog = load(&stars);
    assert_eq!(catalog.len(), 500);
    assert!(!catalog.is_empty());

    for (i, input) in stars.iter().enumerate() {
        let s = catalog.star(i).unwrap();
        assert!((f64::from(s.ra_deg) - input.ra_deg).abs() < 1e-4, "ra {i}");
        assert!((f64::from(s.dec_deg) - input.dec_deg).abs() < 1e-4, "dec {i}");
        assert!((f64::from(s.mag) - input.mag).abs() < 1e-4, "mag {i}");
        if input.hip > 0 {
            assert_eq!(s.id, input.hip);
        } else {
            assert_eq!(s.id, i as i32);
        }
    }
    assert!(catalog.star(500).is_none());
}

#[test]
fn metadata_matches_header() {
    let packed = pack(&synthetic_sky(50, 1));
    let catalog = StarCatalog::load(&packed.bytes).unwrap();
    let meta = catalog.metadata();
    assert_eq!(meta.size_bytes, packed.bytes.len());
    assert_eq!(meta.star_count, 50);
    assert_eq!(meta.payload_crc32, packed.meta.crc32);
    assert_eq!(meta.string_pool_bytes, packed.meta.string_pool_size);
    assert_eq!(meta.index_offset, packed.meta.index_offset);
    assert_eq!(meta.band_entry_count, 50);
    assert_eq!(meta.summary, Some(packed.meta.summary));
}

#[test]
fn strings_and_designations_resolve() {
    let stars = vec![
        star(101.287, -16.716, -1.46)
            .with_hip(32349)
            .with_name("Sirius")
            .with_bayer("Alp")
            .with_flamsteed("9")
            .with_constellation("CMa"),
        star(20.0, 5.0, 5.5).with_bayer("Eps").with_constellation("Psc"),
    ];
    let catalog = load(&stars);

    let sirius = catalog.star(0).unwrap();
    assert_eq!(sirius.name.as_deref(), Some("Sirius"));
    assert_eq!(sirius.bayer.as_deref(), Some("Alp"));
    assert_eq!(sirius.flamsteed.as_deref(), Some("9 CMA"));
    assert_eq!(sirius.constellation, Some("CMA"));
    assert_eq!(sirius.label(), "Sirius");

    let eps = catalog.star(1).unwrap();
    assert_eq!(eps.name, None);
    assert_eq!(eps.bayer.as_deref(), Some("Eps"));
    assert_eq!(eps.flamsteed, None);
    assert_eq!(eps.label(), "Eps");
    assert_eq!(eps.id, 1);
}

#[test]
fn label_falls_back_to_id() {
    let catalog = load(&[star(1.0, 1.0, 1.0), star(2.0, 2.0, 2.0)]);
    assert_eq!(catalog.star(1).unwrap().label(), "#1");
}

#[test]
fn bands_partition_every_star() {
    let catalog = load(&synthetic_sky(2_000, 42));
    let index = catalog.index();

    let mut total = 0;
    for id in MIN_BAND_ID..=MAX_BAND_ID {
        let band = catalog.band(id).unwrap();
        total += band.count;

        let ras = index.band_ras(id);
        assert!(ras.windows(2).all(|w| w[0] <= w[1]), "band {id} unsorted");
        for &star_id in index.band_star_ids(id) {
            let rec = catalog.records().nth(star_id as usize).unwrap();
            assert_eq!(band_id(f64::from(rec.dec_deg)), id);
        }
    }
    assert_eq!(total, 2_000);
    assert_eq!(index.entry_count(), 2_000);
    assert!(catalog.band(90).is_none());
    assert!(catalog.band(-91).is_none());
    assert!(index.band_ras(90).is_empty());
}

#[test]
fn band_id_clamps_poles() {
    assert_eq!(band_id(90.0), 89);
    assert_eq!(band_id(-90.0), -90);
    assert_eq!(band_id(-0.5), -1);
    assert_eq!(band_id(0.0), 0);
    assert_eq!(band_id(45.9), 45);
}

#[test]
fn crc_mismatch_is_rejected() {
    let mut bytes = pack(&synthetic_sky(20, 3)).bytes;
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    assert!(matches!(
        StarCatalog::load(&bytes),
        Err(FormatError::CrcMismatch { .. })
    ));
}

#[test]
fn bad_magic_is_rejected() {
    let mut bytes = pack(&synthetic_sky(5, 3)).bytes;
    bytes[..8].copy_from_slice(b"PTSKCONS");
    assert!(matches!(
        StarCatalog::load(&bytes),
        Err(FormatError::BadMagic { .. })
    ));
}

#[test]
fn truncated_header_is_rejected() {
    let bytes = pack(&synthetic_sky(5, 3)).bytes;
    assert!(matches!(
        StarCatalog::load(&bytes[..20]),
        Err(FormatError::TruncatedInput { .. })
    ));
}

#[test]
fn record_size_mismatch_is_rejected() {
    let mut bytes = pack(&synthetic_sky(10, 3)).bytes;
    // Claim one more record than the section holds.
    set_i32(&mut bytes, 12, 11);
    assert!(matches!(
        StarCatalog::load(&bytes),
        Err(FormatError::RecordSizeMismatch {
            expected: 352,
            actual: 320
        })
    ));
}

#[test]
fn pool_past_payload_is_rejected() {
    let mut bytes = pack(&synthetic_sky(10, 3)).bytes;
    set_i32(&mut bytes, 16, i32::MAX);
    assert!(matches!(
        StarCatalog::load(&bytes),
        Err(FormatError::NegativeOrOutOfBoundsSize {
            field: "string_pool_size",
            ..
        })
    ));
}

#[test]
fn negative_count_is_rejected() {
    let mut bytes = pack(&synthetic_sky(10, 3)).bytes;
    set_i32(&mut bytes, 12, -1);
    assert!(matches!(
        StarCatalog::load(&bytes),
        Err(FormatError::NegativeOrOutOfBoundsSize { .. })
    ));
}

#[test]
fn invalid_band_id_is_rejected() {
    let packed = pack(&synthetic_sky(10, 3));
    let mut bytes = packed.bytes;
    let index_start = HEADER_BYTES + packed.meta.index_offset;
    bytes[index_start..index_start + 2].copy_from_slice(&120i16.to_le_bytes());
    reseal(&mut bytes);
    assert!(matches!(
        StarCatalog::load(&bytes),
        Err(FormatError::InvalidBandId(120))
    ));
}

#[test]
fn star_index_past_records_is_rejected() {
    let packed = pack(&synthetic_sky(10, 3));
    let mut bytes = packed.bytes;
    let ids_start = HEADER_BYTES + packed.meta.index_offset + BAND_COUNT * BAND_ENTRY_BYTES;
    bytes[ids_start..ids_start + 4].copy_from_slice(&10i32.to_le_bytes());
    reseal(&mut bytes);
    assert!(matches!(
        StarCatalog::load(&bytes),
        Err(FormatError::NegativeOrOutOfBoundsSize {
            field: "band_star_index",
            value: 10
        })
    ));
}

#[test]
fn debug_is_compact() {
    let catalog = load(&synthetic_sky(10, 3));
    let dbg = format!("{catalog:?}");
    assert!(dbg.contains("StarCatalog"));
    assert!(dbg.contains("stars: 10"));
}

fn two_star_index() -> Vec<u8> {
    let index = BandIndex::build(&[(20.0, 0.5, 1.0), (10.0, 0.5, 2.0)]);
    let mut bytes = Vec::new();
    index.write_to(&mut bytes).unwrap();
    assert!(BandIndex::decode(&bytes, 2).is_ok());
    bytes
}

#[test]
fn repeated_band_id_is_rejected() {
    let mut bytes = two_star_index();
    // second table entry claims the first entry's id
    bytes[BAND_ENTRY_BYTES..BAND_ENTRY_BYTES + 2]
        .copy_from_slice(&(MIN_BAND_ID as i16).to_le_bytes());
    assert!(matches!(
        BandIndex::decode(&bytes, 2),
        Err(FormatError::InvalidBandId(MIN_BAND_ID))
    ));

    let packed = pack(&synthetic_sky(10, 3));
    let mut bytes = packed.bytes;
    let second_entry = HEADER_BYTES + packed.meta.index_offset + BAND_ENTRY_BYTES;
    bytes[second_entry..second_entry + 2].copy_from_slice(&(MIN_BAND_ID as i16).to_le_bytes());
    reseal(&mut bytes);
    assert!(matches!(
        StarCatalog::load(&bytes),
        Err(FormatError::InvalidBandId(MIN_BAND_ID))
    ));
}

#[test]
fn unsorted_band_ras_are_rejected() {
    let mut bytes = two_star_index();
    let ras_start = BAND_COUNT * BAND_ENTRY_BYTES + 2 * 4;
    bytes[ras_start..ras_start + 4].copy_from_slice(&30f32.to_le_bytes());
    assert!(matches!(
        BandIndex::decode(&bytes, 2),
        Err(FormatError::NegativeOrOutOfBoundsSize {
            field: "band_ra_order",
            ..
        })
    ));
}

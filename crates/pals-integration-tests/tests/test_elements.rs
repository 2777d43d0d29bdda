//! # Element Scenarios
//!
//! One scenario per element kind: build the element, check its name, kind
//! tag, length, and attached parameter blocks, then push it through the
//! tagged [`Element`] union.

mod common;

use anyhow::Result;
use pals_core::{
    ApertureParameters, BeamBeamParameters, BendParameters, BodyShiftParameters,
    ElectricMultipoleParameters, ElementError, FloorShiftParameters, ForkDirection,
    ForkParameters, MagneticMultipoleParameters, MetaParameters, PalsError, PatchParameters,
    RFParameters, ReferenceChangeParameters, ReferenceParameters, SolenoidParameters,
};
use pals_lattice::*;

fn magnetic(fields: &[(&str, f64)]) -> Result<MagneticMultipoleParameters> {
    Ok(MagneticMultipoleParameters::new(fields.iter().copied())?)
}

fn electric(fields: &[(&str, f64)]) -> Result<ElectricMultipoleParameters> {
    Ok(ElectricMultipoleParameters::new(fields.iter().copied())?)
}

fn both(mag: &[(&str, f64)], ele: &[(&str, f64)]) -> Result<Multipoles> {
    Ok(Multipoles::both(magnetic(mag)?, electric(ele)?))
}

fn aperture(half_width: f64) -> Option<ApertureParameters> {
    Some(ApertureParameters {
        x_limits: Some([-half_width, half_width]),
        ..Default::default()
    })
}

fn species(name: &str) -> Option<ReferenceParameters> {
    Some(ReferenceParameters {
        species_ref: Some(name.into()),
        ..Default::default()
    })
}

// ---------------------------------------------------------------------------
// Lengths
// ---------------------------------------------------------------------------

#[test]
fn drift_length_is_validated() -> Result<()> {
    common::init_tracing();

    let mut drift = Drift::new("drift_element", 1.0)?;
    assert_eq!(drift.name(), "drift_element");
    assert_eq!(drift.length(), Some(1.0));

    let err = drift.set_length(-1.0).unwrap_err();
    assert_eq!(err, ElementError::NegativeLength { length: -1.0 });
    assert_eq!(drift.length(), Some(1.0), "failed update must not change the element");
    Ok(())
}

#[test]
fn negative_length_rejected_when_deserializing() {
    common::init_tracing();

    let err = codec::from_yaml::<Element>("kind: Drift\nname: d\nlength: -1.0\n").unwrap_err();
    assert!(matches!(err, PalsError::Serialization(_)));
}

#[test]
fn marker_kind_and_length() {
    let marker = Marker::new("marker1");
    assert_eq!(marker.name(), "marker1");
    assert_eq!(Element::from(marker).kind(), "Marker");
}

// ---------------------------------------------------------------------------
// Multipole magnets
// ---------------------------------------------------------------------------

#[test]
fn quadrupole_with_both_multipole_blocks() -> Result<()> {
    common::init_tracing();

    let quad = Quadrupole::new(
        "quadrupole_element",
        1.0,
        both(
            &[("Bn1", 1.1), ("Bs1", 2.1), ("tilt1", 3.1), ("Bn2", 1.2), ("Bs2", 2.2), ("tilt2", 3.2)],
            &[("En1", 1.1), ("Es1", 2.1), ("tilt1", 3.1), ("En2", 1.2), ("Es2", 2.2), ("tilt2", 3.2)],
        )?,
    )?;
    assert_eq!(quad.name(), "quadrupole_element");
    assert_eq!(quad.length(), Some(1.0));

    let mag = quad.magnetic_multipole().expect("magnetic block attached");
    assert_eq!(mag.get("Bn1"), Some(1.1));
    assert_eq!(mag.get("Bs2"), Some(2.2));
    assert_eq!(mag.get("tilt2"), Some(3.2));

    let ele = quad.electric_multipole().expect("electric block attached");
    assert_eq!(ele.get("En2"), Some(1.2));
    assert_eq!(ele.get("Es1"), Some(2.1));
    assert_eq!(ele.get("tilt1"), Some(3.1));

    let yaml = codec::to_yaml(&Element::from(quad.clone()))?;
    assert!(yaml.contains("kind: Quadrupole"), "{yaml}");
    assert_eq!(codec::from_yaml::<Element>(&yaml)?, Element::Quadrupole(quad));
    Ok(())
}

#[test]
fn sextupole_with_aperture() -> Result<()> {
    let mut sext = Sextupole::new("sext1", 0.5, both(&[("Bn2", 1.0)], &[("En2", 1.0)])?)?;
    sext.common.aperture = aperture(0.1);

    assert_eq!(Sextupole::KIND, "Sextupole");
    assert_eq!(sext.length(), Some(0.5));
    assert_eq!(sext.magnetic_multipole().and_then(|b| b.get("Bn2")), Some(1.0));
    assert_eq!(sext.electric_multipole().and_then(|b| b.get("En2")), Some(1.0));
    assert_eq!(
        sext.common.aperture.as_ref().and_then(|a| a.x_limits),
        Some([-0.1, 0.1])
    );
    Ok(())
}

#[test]
fn octupole_with_meta() -> Result<()> {
    let mut oct = Octupole::new("oct1", 0.3, both(&[("Bn3", 0.5)], &[("En3", 0.5)])?)?;
    oct.common.meta = Some(MetaParameters {
        alias: Some("octupole_test".into()),
        description: None,
    });

    assert_eq!(Element::from(oct.clone()).kind(), "Octupole");
    assert_eq!(oct.magnetic_multipole().and_then(|b| b.get("Bn3")), Some(0.5));
    assert_eq!(oct.common.meta.and_then(|m| m.alias).as_deref(), Some("octupole_test"));
    Ok(())
}

#[test]
fn multipole_with_body_shift() -> Result<()> {
    let mut mult = Multipole::new(
        "mult1",
        0.4,
        both(&[("Bn1", 2.0), ("Bn2", 1.5)], &[("En1", 2.0), ("En2", 1.5)])?,
    )?;
    mult.common.body_shift = Some(BodyShiftParameters {
        x_offset: Some(0.01),
        ..Default::default()
    });

    assert_eq!(mult.magnetic_multipole().map(|b| b.len()), Some(2));
    assert_eq!(mult.electric_multipole().and_then(|b| b.get("En2")), Some(1.5));
    assert_eq!(mult.common.body_shift.and_then(|b| b.x_offset), Some(0.01));
    Ok(())
}

#[test]
fn magnets_without_multipoles_are_rejected() {
    common::init_tracing();

    for kind in ["Quadrupole", "Sextupole", "Octupole", "Multipole"] {
        let json = format!(r#"{{"kind":"{kind}","name":"m","length":1.0}}"#);
        let err = codec::from_json::<Element>(&json).unwrap_err();
        assert!(err.to_string().contains(kind), "{kind}: {err}");
    }

    let err = Quadrupole::new("q", 1.0, Multipoles::default()).unwrap_err();
    assert_eq!(
        err,
        ElementError::MissingRequiredAssociation {
            kind: "Quadrupole",
            alternatives: MULTIPOLE_BLOCKS,
        }
    );
    assert!(err.to_string().contains("'MagneticMultipoleP'"), "{err}");
}

#[test]
fn electric_only_magnet_is_accepted() -> Result<()> {
    let element: Element = codec::from_yaml(
        "kind: Multipole\nname: m\nlength: 0.0\nElectricMultipoleP:\n  En1L: 1.0\n  Es1L: 0.5\n",
    )?;
    let Element::Multipole(mult) = element else {
        anyhow::bail!("expected a multipole");
    };
    assert!(mult.magnetic_multipole().is_none());
    assert_eq!(mult.electric_multipole().and_then(|b| b.get("Es1L")), Some(0.5));
    Ok(())
}

// ---------------------------------------------------------------------------
// Bends, solenoids, cavities, patches
// ---------------------------------------------------------------------------

#[test]
fn rbend_with_bend_aperture_meta() -> Result<()> {
    let mut bend = RBend::new("rbend1", 1.0)?;
    bend.bend = Some(BendParameters {
        rho_ref: Some(1.0),
        bend_field_ref: Some(2.0),
        ..Default::default()
    });
    bend.common.aperture = aperture(0.2);
    bend.common.meta = Some(MetaParameters {
        alias: None,
        description: Some("Test bend".into()),
    });

    assert_eq!(RBend::KIND, "RBend");
    assert_eq!(bend.bend.as_ref().and_then(|b| b.rho_ref), Some(1.0));
    assert_eq!(
        bend.common.meta.as_ref().and_then(|m| m.description.as_deref()),
        Some("Test bend")
    );

    let json = codec::to_value(&Element::from(bend))?;
    assert_eq!(json["BendP"]["rho_ref"], 1.0);
    assert_eq!(json["ApertureP"]["x_limits"], serde_json::json!([-0.2, 0.2]));
    assert_eq!(json["MetaP"]["description"], "Test bend");
    Ok(())
}

#[test]
fn sbend_with_reference() -> Result<()> {
    let mut bend = SBend::new("sbend1", 1.2)?;
    bend.bend = Some(BendParameters {
        rho_ref: Some(1.5),
        bend_field_ref: Some(3.0),
        ..Default::default()
    });
    bend.common.reference = species("proton");

    assert_eq!(bend.length(), Some(1.2));
    assert_eq!(
        bend.common.reference.and_then(|r| r.species_ref).as_deref(),
        Some("proton")
    );
    Ok(())
}

#[test]
fn solenoid_parameters() -> Result<()> {
    let element: Element = codec::from_json(
        r#"{"kind":"Solenoid","name":"sol1","length":0.8,"SolenoidP":{"Ksol":0.1,"Bsol":0.2}}"#,
    )?;
    let Element::Solenoid(sol) = element else {
        anyhow::bail!("expected a solenoid");
    };
    assert_eq!(sol.length(), Some(0.8));
    assert_eq!(sol.solenoid.and_then(|s| s.ksol), Some(0.1));
    Ok(())
}

#[test]
fn rf_cavity_with_solenoid_field() -> Result<()> {
    let mut cavity = RFCavity::new("rf1", 0.5)?;
    cavity.rf = Some(RFParameters {
        frequency: Some(1e9),
        voltage: Some(1e6),
        ..Default::default()
    });
    cavity.solenoid = Some(SolenoidParameters {
        ksol: Some(0.05),
        bsol: None,
    });

    assert_eq!(RFCavity::KIND, "RFCavity");
    assert_eq!(cavity.rf.as_ref().and_then(|rf| rf.frequency), Some(1e9));
    assert_eq!(cavity.solenoid.as_ref().and_then(|s| s.ksol), Some(0.05));
    Ok(())
}

#[test]
fn patch_with_reference_change() -> Result<()> {
    let mut patch = Patch::new("patch1", 0.3)?;
    patch.patch = Some(PatchParameters {
        x_offset: Some(0.1),
        y_offset: Some(0.2),
        ..Default::default()
    });
    patch.common.reference_change = Some(ReferenceChangeParameters {
        de_ref: Some(1e6),
        extra_dtime_ref: None,
    });

    let value = codec::to_value(&Element::from(patch))?;
    assert_eq!(value["kind"], "Patch");
    assert_eq!(value["PatchP"]["x_offset"], 0.1);
    assert_eq!(value["ReferenceChangeP"]["dE_ref"], 1e6);
    Ok(())
}

// ---------------------------------------------------------------------------
// Thin elements
// ---------------------------------------------------------------------------

#[test]
fn floor_shift_fork_beam_beam() -> Result<()> {
    let mut shift = FloorShift::new("floor1");
    shift.floor_shift = Some(FloorShiftParameters {
        x_offset: Some(0.5),
        z_offset: Some(1.0),
        ..Default::default()
    });
    shift.common.meta = Some(MetaParameters {
        alias: Some("floor_test".into()),
        description: None,
    });
    assert_eq!(shift.length(), None);
    assert_eq!(shift.floor_shift.as_ref().and_then(|f| f.x_offset), Some(0.5));

    let mut fork = Fork::new("fork1");
    fork.fork = Some(ForkParameters {
        to_line: Some("line1".into()),
        direction: Some(ForkDirection::Forwards),
        ..Default::default()
    });
    fork.common.reference = species("electron");
    let value = codec::to_value(&Element::from(fork))?;
    assert_eq!(value["ForkP"]["direction"], "FORWARDS");
    assert_eq!(value["ForkP"]["to_line"], "line1");

    let mut bb = BeamBeam::new("bb1");
    bb.beam_beam = Some(BeamBeamParameters {});
    bb.common.aperture = aperture(0.05);
    assert_eq!(Element::from(bb).kind(), "BeamBeam");
    Ok(())
}

#[test]
fn thin_kinds_have_tags_and_no_length() {
    let elements: Vec<Element> = vec![
        BeginningEle::new("begin1").into(),
        Fiducial::new("fid1").into(),
        NullEle::new("null1").into(),
        Feedback::new("fb1").into(),
        Girder::new("girder1").into(),
        Match::new("match1").into(),
        Taylor::new("taylor1").into(),
        Foil::new("foil1").into(),
        Converter::new("conv1").into(),
    ];
    let kinds: Vec<&str> = elements.iter().map(Element::kind).collect();
    assert_eq!(
        kinds,
        [
            "BeginningEle",
            "Fiducial",
            "NullEle",
            "Feedback",
            "Girder",
            "Match",
            "Taylor",
            "Foil",
            "Converter"
        ]
    );
    assert!(elements.iter().all(|e| e.length().is_none()));
}

#[test]
fn converter_carries_optional_multipoles() -> Result<()> {
    let mut conv = Converter::new("conv1");
    conv.multipoles = both(&[("Bn1", 0.4)], &[("En1", 0.2)])?;
    assert_eq!(conv.multipoles.magnetic.as_ref().and_then(|b| b.get("Bn1")), Some(0.4));
    Element::from(conv).validate()?;
    Ok(())
}

#[test]
fn thick_kinds_with_optional_multipoles() -> Result<()> {
    let cases: [(&str, f64, f64, f64); 7] = [
        ("Kicker", 0.2, 0.5, 0.3),
        ("ACKicker", 0.15, 0.1, 0.1),
        ("CrabCavity", 0.25, 0.8, 0.4),
        ("EGun", 0.1, 1.2, 0.6),
        ("Instrument", 0.05, 0.2, 0.1),
        ("Mask", 0.02, 0.15, 0.08),
        ("Wiggler", 2.0, 0.5, 0.3),
    ];
    for (kind, length, bn1, en1) in cases {
        let doc = format!(
            "kind: {kind}\nname: e\nlength: {length}\n\
             MagneticMultipoleP:\n  Bn1: {bn1}\nElectricMultipoleP:\n  En1: {en1}\n"
        );
        let element: Element = codec::from_yaml(&doc)?;
        assert_eq!(element.kind(), kind);
        assert_eq!(element.length(), Some(length));
        element.validate()?;
    }

    // Multipoles stay optional for these kinds.
    let bare: Element = codec::from_json(r#"{"kind":"ACKicker","name":"ackick1","length":0.15}"#)?;
    assert_eq!(bare.length(), Some(0.15));
    Ok(())
}

// ---------------------------------------------------------------------------
// Lines and unions
// ---------------------------------------------------------------------------

#[test]
fn beamline_extension() -> Result<()> {
    let marker = Element::from(Marker::new("element1"));
    let mut line1 = BeamLine::new("line1");
    line1.push(marker.clone());
    assert_eq!(line1.line, [marker.clone()]);

    let drift2 = Element::from(Drift::new("element2", 2.0)?);
    line1.extend([drift2.clone()]);
    assert_eq!(line1.line, [marker.clone(), drift2.clone()]);

    let drift3 = Element::from(Drift::new("element3", 3.0)?);
    let mut line2 = BeamLine::new("line2");
    line2.push(drift3.clone());
    line1.extend_from_line(&line2);
    assert_eq!(line1.line, [marker, drift2, drift3]);
    assert_eq!(line1.total_length(), 5.0);
    Ok(())
}

#[test]
fn union_of_overlapping_elements() -> Result<()> {
    let empty = UnionEle::new("union1", Vec::new());
    assert_eq!(Element::from(empty.clone()).kind(), "UnionEle");
    assert!(empty.elements.is_empty());

    let union = UnionEle::new(
        "union2",
        vec![Marker::new("m1").into(), Drift::new("d1", 1.0)?.into()],
    );
    let names: Vec<&str> = union.elements.iter().map(Element::name).collect();
    assert_eq!(names, ["m1", "d1"]);
    assert_eq!(union.length(), Some(1.0));
    Ok(())
}

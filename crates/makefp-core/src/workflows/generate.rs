use super::config::GenerateConfig;
use crate::core::io::charges::read_charge_table_from_path;
use crate::core::io::names::read_name_list_from_path;
use crate::core::io::table::{TableError, read_reference_from_path, read_shell_from_path};
use crate::core::io::{efp, gamess};
use crate::core::models::atom::ConsumedAtomSet;
use crate::core::utils::identifiers::extract_run_tag;
use crate::engine::error::EngineError;
use crate::engine::fragments::{apply_caps, assemble};
use crate::engine::{classify, superfrag};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument};

/// Paths to the five input sources plus the directory under which the
/// per-run output directory is created.
#[derive(Debug, Clone)]
pub struct GenerateInputs {
    /// The larger coordinate source covering the whole system; also supplies
    /// the run tag through its file name.
    pub reference_path: PathBuf,
    /// The coordinate source covering the solvation shell of interest.
    pub shell_path: PathBuf,
    pub charge_types_path: PathBuf,
    pub ligand_names_path: PathBuf,
    pub excluded_names_path: PathBuf,
    pub output_root: PathBuf,
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub run_tag: String,
    pub output_dir: PathBuf,
    pub fragment_files: Vec<PathBuf>,
    pub superfragment_file: Option<PathBuf>,
    /// Shell atoms dropped because their name prefix mapped to no element.
    pub unmapped_atoms: usize,
    /// Superfragment sites emitted without a monopole.
    pub unassigned_monopoles: usize,
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Failed to read '{path}': {source}", path = path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: TableError,
    },

    #[error("No run tag (decimal digits) in reference file name '{path}'", path = path.display())]
    MissingRunTag { path: PathBuf },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Runs the full pipeline: load, classify, assemble and cap fragments, write
/// one MAKEFP card per fragment, and (optionally) reduce the rest of the
/// system to the point-charge superfragment. All outputs land in
/// `{output_root}/efp_{run_tag}`, each written to a temporary name and
/// renamed into place so a failure never leaves a half-written file behind.
#[instrument(skip_all, name = "makefp_workflow")]
pub fn run(inputs: &GenerateInputs, config: &GenerateConfig) -> Result<GenerateOutcome, GenerateError> {
    let run_tag =
        extract_run_tag(&inputs.reference_path).ok_or_else(|| GenerateError::MissingRunTag {
            path: inputs.reference_path.clone(),
        })?;
    info!(%run_tag, "Loading coordinate sources and charge table.");

    let reference = read_input(
        &inputs.reference_path,
        read_reference_from_path(&inputs.reference_path),
    )?;
    let shell = read_input(&inputs.shell_path, read_shell_from_path(&inputs.shell_path))?;
    let charges = read_input(
        &inputs.charge_types_path,
        read_charge_table_from_path(&inputs.charge_types_path),
    )?;
    let ligand_names = read_input(
        &inputs.ligand_names_path,
        read_name_list_from_path(&inputs.ligand_names_path),
    )?;
    let excluded_names = read_input(
        &inputs.excluded_names_path,
        read_name_list_from_path(&inputs.excluded_names_path),
    )?;
    info!(
        shell_records = shell.len(),
        reference_records = reference.len(),
        charge_types = charges.len(),
        "Sources loaded."
    );

    let index = classify::classify(
        &shell,
        &ligand_names,
        &excluded_names,
        config.include_ligands,
    );
    info!(
        capped = index.capped.len(),
        ligands = index.ligands.len(),
        "Classification complete."
    );

    let mut consumed = ConsumedAtomSet::default();
    let mut fragments = assemble(&shell, &index, &mut consumed);
    apply_caps(
        &mut fragments,
        &index,
        &shell,
        &reference,
        &ligand_names,
        &mut consumed,
    )?;

    let output_dir = inputs.output_root.join(format!("efp_{run_tag}"));
    fs::create_dir_all(&output_dir)?;

    let mut fragment_files = Vec::with_capacity(fragments.fragments().len());
    for fragment in fragments.fragments() {
        let path = output_dir.join(format!("f_{}_{}.inp", fragment.residue_number, run_tag));
        write_atomically(&path, |writer| gamess::write_fragment(fragment, writer))?;
        fragment_files.push(path);
    }
    info!(fragments = fragment_files.len(), "Fragment files written.");

    let mut unassigned_monopoles = 0;
    let superfragment_file = if config.include_superfragment {
        let superfragment = superfrag::assemble(&reference, &charges, &consumed);
        unassigned_monopoles = superfragment.unassigned_monopoles;
        let path = output_dir.join(format!("sf_{run_tag}.efp"));
        write_atomically(&path, |writer| {
            efp::write_superfragment(&superfragment, writer)
        })?;
        info!(sites = superfragment.sites.len(), "Superfragment written.");
        Some(path)
    } else {
        None
    };

    Ok(GenerateOutcome {
        run_tag,
        output_dir,
        fragment_files,
        superfragment_file,
        unmapped_atoms: fragments.unmapped_atoms,
        unassigned_monopoles,
    })
}

fn read_input<T>(path: &Path, result: Result<T, TableError>) -> Result<T, GenerateError> {
    result.map_err(|source| GenerateError::Input {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes through a dot-prefixed temporary sibling, then renames over the
/// final path. Rename within one directory is atomic on the platforms this
/// runs on.
fn write_atomically(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> io::Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name"))?
        .to_string_lossy();
    let tmp_path = path.with_file_name(format!(".{file_name}.tmp"));

    let file = File::create(&tmp_path)?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    writer.flush()?;
    drop(writer);

    fs::rename(&tmp_path, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write_file(path: &Path, content: &str) {
        fs::write(path, content).unwrap();
    }

    fn reference_text() -> String {
        let mut text = String::new();
        for i in 0..7 {
            text.push_str(&format!("reference header {}\n", i));
        }
        text.push_str("1 ALA N opls_238 0.100 0.200 0.300\n");
        text.push_str("1 ALA CA opls_224 0.200 0.300 0.400\n");
        text.push_str("1 ALA C opls_235 0.300 0.400 0.500\n");
        text.push_str("1 ALA O opls_236 0.400 0.500 0.600\n");
        text.push_str("2 ALA N opls_238 0.500 0.600 0.700\n");
        text.push_str("2 ALA H opls_241 0.510 0.610 0.710\n");
        text.push_str("2 ALA CA opls_224 0.600 0.700 0.800\n");
        text.push_str("2 ALA C opls_235 0.700 0.800 0.900\n");
        text.push_str("2 ALA O opls_236 0.800 0.900 1.000\n");
        text.push_str("3 SOL OW opls_116 1.100 1.200 1.300\n");
        text.push_str("3 SOL HW1 opls_117 1.150 1.250 1.350\n");
        text.push_str("3 SOL HW2 opls_117 1.160 1.260 1.360\n");
        text.push_str("4 CL CL opls_401 2.000 2.100 2.200\n");
        for i in 0..4 {
            text.push_str(&format!("reference footer {}\n", i));
        }
        text
    }

    fn shell_text() -> String {
        let mut text = String::new();
        for i in 0..4 {
            text.push_str(&format!("shell header {}\n", i));
        }
        text.push_str("2 ALA N opls_238 0.500 0.600 0.700\n");
        text.push_str("2 ALA H opls_241 0.510 0.610 0.710\n");
        text.push_str("2 ALA CA opls_224 0.600 0.700 0.800\n");
        text.push_str("2 ALA C opls_235 0.700 0.800 0.900\n");
        text.push_str("2 ALA O opls_236 0.800 0.900 1.000\n");
        text.push_str("3 SOL OW opls_116 1.100 1.200 1.300\n");
        text.push_str("3 SOL HW1 opls_117 1.150 1.250 1.350\n");
        text.push_str("3 SOL HW2 opls_117 1.160 1.260 1.360\n");
        for i in 0..4 {
            text.push_str(&format!("shell footer {}\n", i));
        }
        text
    }

    fn charges_text() -> String {
        let mut text = String::from("charge-type table header\n");
        text.push_str("1 N3 N N 1 opls_238 -0.500 14.0\n");
        text.push_str("2 CT CA C 1 opls_224 0.140 12.0\n");
        text.push_str("3 C_ C C 1 opls_235 0.500 12.0\n");
        text.push_str("4 O_ O O 1 opls_236 -0.500 16.0\n");
        text
    }

    fn setup(dir: &Path) -> GenerateInputs {
        let reference_path = dir.join("frame_100.gro");
        let shell_path = dir.join("shell.gro");
        let charge_types_path = dir.join("types.itp");
        let ligand_names_path = dir.join("ligands");
        let excluded_names_path = dir.join("taas");

        write_file(&reference_path, &reference_text());
        write_file(&shell_path, &shell_text());
        write_file(&charge_types_path, &charges_text());
        write_file(&ligand_names_path, "LIG\n");
        write_file(&excluded_names_path, "XXX\n");

        GenerateInputs {
            reference_path,
            shell_path,
            charge_types_path,
            ligand_names_path,
            excluded_names_path,
            output_root: dir.to_path_buf(),
        }
    }

    #[test]
    fn run_writes_one_fragment_file_per_qualifying_residue() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = setup(dir.path());
        let outcome = run(&inputs, &GenerateConfig::default()).unwrap();

        assert_eq!(outcome.run_tag, "100");
        assert_eq!(outcome.output_dir, dir.path().join("efp_100"));
        assert_eq!(outcome.fragment_files.len(), 2);
        assert!(outcome.output_dir.join("f_2_100.inp").exists());
        assert!(outcome.output_dir.join("f_3_100.inp").exists());
        assert!(outcome.superfragment_file.is_none());
        assert_eq!(outcome.unmapped_atoms, 0);
    }

    #[test]
    fn capped_fragment_contains_its_atoms_plus_the_four_cap_lines() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = setup(dir.path());
        let outcome = run(&inputs, &GenerateConfig::default()).unwrap();

        let card = fs::read_to_string(outcome.output_dir.join("f_2_100.inp")).unwrap();
        let atom_lines: Vec<&str> = card
            .lines()
            .skip(12)
            .take_while(|l| *l != " $end")
            .collect();

        // N, H, CA from the shell, then C, O, H000, H000 caps.
        assert_eq!(atom_lines.len(), 7);
        assert!(atom_lines[0].starts_with(" N      7.0   5.00000000"));
        assert!(atom_lines[3].starts_with(" C      6.0   3.00000000"));
        assert!(atom_lines[4].starts_with(" O      8.0   4.00000000"));
        assert!(atom_lines[5].starts_with(" H000   1.0"));
        assert!(atom_lines[6].starts_with(" H000   1.0"));
        assert!(card.ends_with(" $end"));
    }

    #[test]
    fn water_fragment_has_three_atoms_and_no_synthetic_lines() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = setup(dir.path());
        let outcome = run(&inputs, &GenerateConfig::default()).unwrap();

        let card = fs::read_to_string(outcome.output_dir.join("f_3_100.inp")).unwrap();
        let atom_lines: Vec<&str> = card
            .lines()
            .skip(12)
            .take_while(|l| *l != " $end")
            .collect();
        assert_eq!(atom_lines.len(), 3);
        assert!(atom_lines[0].starts_with(" O      8.0   11.00000000"));
        assert!(!card.contains("H000"));
    }

    #[test]
    fn superfragment_covers_exactly_the_unconsumed_atoms() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = setup(dir.path());
        let config = GenerateConfig {
            include_superfragment: true,
            ..Default::default()
        };
        let outcome = run(&inputs, &config).unwrap();

        let path = outcome.superfragment_file.unwrap();
        let text = fs::read_to_string(&path).unwrap();

        // Remaining: residue 1's N and CA, residue 2's own C and O, and the
        // chloride ion. Residue 1's C/O were absorbed as cap atoms and the
        // whole shell was consumed.
        let coord_lines = text
            .lines()
            .skip_while(|l| *l != " COORDINATES (BOHR)")
            .skip(1)
            .take_while(|l| *l != " STOP")
            .count();
        assert_eq!(coord_lines, 5);

        // Charge-table entries win; the chloride falls back to the ion rule.
        assert!(text.contains(" O0   -0.50000000  0.00000000\n"));
        assert!(text.contains(" O4   -1.00000000  0.00000000\n"));
        assert!(text.ends_with(" $END"));
        assert_eq!(outcome.unassigned_monopoles, 0);
    }

    #[test]
    fn reruns_over_identical_inputs_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = setup(dir.path());
        let config = GenerateConfig {
            include_superfragment: true,
            ..Default::default()
        };

        run(&inputs, &config).unwrap();
        let first = fs::read(dir.path().join("efp_100/f_2_100.inp")).unwrap();
        let first_sf = fs::read(dir.path().join("efp_100/sf_100.efp")).unwrap();

        run(&inputs, &config).unwrap();
        let second = fs::read(dir.path().join("efp_100/f_2_100.inp")).unwrap();
        let second_sf = fs::read(dir.path().join("efp_100/sf_100.efp")).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_sf, second_sf);
    }

    #[test]
    fn no_temporary_files_remain_after_a_run() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = setup(dir.path());
        let outcome = run(&inputs, &GenerateConfig::default()).unwrap();

        let leftovers: Vec<_> = fs::read_dir(&outcome.output_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn reference_file_name_without_digits_is_a_missing_run_tag() {
        let dir = tempfile::tempdir().unwrap();
        let mut inputs = setup(dir.path());
        let undigited = dir.path().join("frame.gro");
        fs::rename(&inputs.reference_path, &undigited).unwrap();
        inputs.reference_path = undigited;

        let err = run(&inputs, &GenerateConfig::default()).unwrap_err();
        assert!(matches!(err, GenerateError::MissingRunTag { .. }));
    }

    #[test]
    fn missing_input_file_reports_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut inputs = setup(dir.path());
        inputs.shell_path = dir.path().join("absent.gro");

        let err = run(&inputs, &GenerateConfig::default()).unwrap_err();
        match err {
            GenerateError::Input { path, .. } => assert_eq!(path, inputs.shell_path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn capping_failure_aborts_before_any_fragment_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = setup(dir.path());

        // A reference source that opens with residue 2 leaves the backward
        // scan nothing to find.
        let mut text = String::new();
        for i in 0..7 {
            text.push_str(&format!("reference header {}\n", i));
        }
        text.push_str("2 ALA N opls_238 0.500 0.600 0.700\n");
        text.push_str("2 ALA H opls_241 0.510 0.610 0.710\n");
        text.push_str("2 ALA CA opls_224 0.600 0.700 0.800\n");
        for i in 0..4 {
            text.push_str(&format!("reference footer {}\n", i));
        }
        write_file(&inputs.reference_path, &text);

        let err = run(&inputs, &GenerateConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Engine(EngineError::MissingBackboneAtom { .. })
        ));
        assert!(!dir.path().join("efp_100").exists());
    }

    #[test]
    fn ligand_fragments_appear_only_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = setup(dir.path());

        // Append a ligand residue to the shell (before the footer).
        let mut shell = shell_text();
        let insert_at = shell.find("shell footer").unwrap();
        shell.insert_str(insert_at, "5 LIG C1 opls_800 3.000 3.100 3.200\n");
        write_file(&inputs.shell_path, &shell);

        let without = run(&inputs, &GenerateConfig::default()).unwrap();
        assert!(!without.output_dir.join("f_5_100.inp").exists());

        let config = GenerateConfig {
            include_ligands: true,
            ..Default::default()
        };
        let with = run(&inputs, &config).unwrap();
        assert!(with.output_dir.join("f_5_100.inp").exists());
    }
}

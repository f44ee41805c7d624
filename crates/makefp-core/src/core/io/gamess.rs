use crate::core::models::fragment::Fragment;
use crate::core::utils::identifiers::formal_charge;
use std::io::{self, Write};

/// Serializes one fragment as a GAMESS MAKEFP input card.
///
/// The header is fixed text except for `icharg`, which carries the net formal
/// charge derived from the residue name. Atom lines follow in insertion
/// order; the card ends with ` $end` and no trailing newline.
pub fn write_fragment(fragment: &Fragment, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, " $contrl units=angs local=boys runtyp=makefp")?;
    writeln!(
        writer,
        " mult=1 icharg={} coord=cart icut=11 $end",
        formal_charge(&fragment.residue_name)
    )?;
    writeln!(writer, " $system timlim=99999 mwords=500 $end")?;
    writeln!(
        writer,
        " $scf soscf=.f. dirscf=.t. diis=.t. CONV=1.0d-06 $end"
    )?;
    writeln!(writer, " $basis gbasis=n31 ngauss=6")?;
    writeln!(writer, " ndfunc=1 $end")?;
    writeln!(writer, " $local maxloc=1000 $end")?;
    writeln!(
        writer,
        " $DAMP IFTTYP(1)=2,0 IFTFIX(1)=1,1 thrsh=500.0 $end"
    )?;
    writeln!(
        writer,
        " $MAKEFP POL=.t. DISP=.f. CHTR=.f. EXREP=.f. DISP7=.f. $end"
    )?;
    writeln!(writer, " $data")?;
    writeln!(writer, " fragment")?;
    writeln!(writer, "C1")?;

    for atom in &fragment.atoms {
        writeln!(
            writer,
            " {:<7}{:.1}   {:.8}   {:.8}   {:.8}",
            atom.label, atom.atomic_number, atom.position.x, atom.position.y, atom.position.z
        )?;
    }

    write!(writer, " $end")?;
    Ok(())
}

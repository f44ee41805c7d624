use crate::core::models::charge::Superfragment;
use std::io::{self, Write};

/// Serializes the superfragment in the effective-fragment-potential data
/// format: a fixed preamble, then COORDINATES/MONOPOLES/SCREEN2 blocks, each
/// closed by a ` STOP` sentinel, ending with ` $END` and no trailing newline.
///
/// Sites without an assigned monopole still emit coordinate and screening
/// lines; they simply have no entry in the MONOPOLES block.
pub fn write_superfragment(superfragment: &Superfragment, writer: &mut impl Write) -> io::Result<()> {
    writeln!(
        writer,
        "          RUNTYP=MAKEFP EFFECTIVE FRAGMENT POTENTIAL DATA FOLLOWS..."
    )?;
    writeln!(writer, "          FRAGNAMEEFP")?;
    writeln!(writer, " $FRAGNAME")?;
    writeln!(writer, "EFP DATA FOR FRAGNAME")?;

    writeln!(writer, " COORDINATES (BOHR)")?;
    for site in &superfragment.sites {
        writeln!(
            writer,
            " O{}   {:.8}   {:.8}   {:.8}   0.00000001   0.000000005",
            site.label_index, site.position.x, site.position.y, site.position.z
        )?;
    }
    writeln!(writer, " STOP")?;

    writeln!(writer, " MONOPOLES")?;
    for site in &superfragment.sites {
        if let Some(charge) = site.monopole {
            writeln!(
                writer,
                " O{}   {:.8}  {:.8}",
                site.label_index, charge, 0.0
            )?;
        }
    }
    writeln!(writer, " STOP")?;

    writeln!(writer, " SCREEN2      (FROM VDWSCL=   0.700)")?;
    for site in &superfragment.sites {
        writeln!(
            writer,
            " O{}          1.00000000      10.0000000",
            site.label_index
        )?;
    }
    writeln!(writer, " STOP")?;

    write!(writer, " $END")?;
    Ok(())
}

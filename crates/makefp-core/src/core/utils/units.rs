use nalgebra::Point3;

/// Source coordinates are in nm; the MAKEFP card wants angstroms.
pub const ANGSTROMS_PER_NM: f64 = 10.0;

/// The superfragment coordinate block is in bohr.
pub const BOHRS_PER_ANGSTROM: f64 = 1.8897259886;

pub fn nm_to_angstrom(position: Point3<f64>) -> Point3<f64> {
    position * ANGSTROMS_PER_NM
}

pub fn angstrom_to_bohr(position: Point3<f64>) -> Point3<f64> {
    position * BOHRS_PER_ANGSTROM
}

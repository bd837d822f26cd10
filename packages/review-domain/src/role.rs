pub const ROLES: [&str; 6] = ["advisor", "investor", "employee", "partner", "cxo", "founder"];

pub fn is_known(role: &str) -> bool {
	ROLES.contains(&role)
}

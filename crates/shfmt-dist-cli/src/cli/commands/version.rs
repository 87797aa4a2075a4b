use shfmt_dist_core::locator::packaged_version;

pub fn run_version() {
    println!("{}", packaged_version());
}

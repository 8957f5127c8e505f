fn main() -> anyhow::Result<()> {
    neonclock_lib::run()
}

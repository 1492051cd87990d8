fn main() -> anyhow::Result<()> {
    scene_ngin::demos::lights::run()
}

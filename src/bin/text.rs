fn main() -> anyhow::Result<()> {
    scene_ngin::demos::text::run()
}

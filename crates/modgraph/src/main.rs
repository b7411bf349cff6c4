fn main() -> anyhow::Result<()> {
    modgraph_lib::main()
}

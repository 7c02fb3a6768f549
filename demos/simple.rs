use nested_sets::family::Family;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut family = Family::default();
    println!("family = {:?}", family);

    let fruit = family.new_set();
    println!("fruit = {}", fruit);
    let citrus = family.spawn_child(fruit);
    println!("citrus = {}", citrus);
    let sour = family.new_set();
    println!("sour = {}", sour);

    family.add_item(fruit, "apple");
    family.add_item(citrus, "lemon");
    family.add_item(citrus, "orange");
    family.add_item(sour, "lemon");
    family.add_item(sour, "vinegar");

    let mut fruits: Vec<_> = family.values(fruit).collect();
    fruits.sort();
    println!("fruit holds {:?}", fruits);

    let tangy = family.union_with(citrus, sour);
    println!("tangy = {} (len={})", tangy, family.len(tangy));
    let sour_citrus = family.intersection_with(citrus, sour);
    println!("sour_citrus = {} (len={})", sour_citrus, family.len(sour_citrus));

    family.add_item(sour_citrus, "lime");
    println!("after adding lime, tangy has len={}", family.len(tangy));

    println!("{}", family.debug_string(tangy));
    print!("{}", family.dump_state());

    Ok(())
}

use super::table::{cb_cycles, cb_flags, FlagEffect, OpcodeInfo, OPCODES};
use super::*;
use crate::error::EmulationError;
use crate::machine::GameBoy;
use once_cell::sync::OnceCell;

struct TestBus {
    memory: [u8; 0x10000],
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
        }
    }
}

impl TestBus {
    fn with_program(origin: u16, program: &[u8]) -> Self {
        let mut bus = Self::default();
        let start = origin as usize;
        bus.memory[start..start + program.len()].copy_from_slice(program);
        bus
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }
}

fn cpu_at(pc: u16) -> Cpu {
    let mut cpu = Cpu::new();
    cpu.regs.pc = pc;
    cpu
}

fn step(cpu: &mut Cpu, bus: &mut TestBus) -> u32 {
    cpu.step(bus).expect("test programs only use defined opcodes")
}

fn flags(cpu: &Cpu) -> (bool, bool, bool, bool) {
    (
        cpu.get_flag(Flag::Z),
        cpu.get_flag(Flag::N),
        cpu.get_flag(Flag::H),
        cpu.get_flag(Flag::C),
    )
}

static CPU_INSTRS_ROM: OnceCell<Vec<u8>> = OnceCell::new();

// Serial output of blargg's cpu_instrs.gb when every sub-test passes.
const CPU_SERIAL_EXPECT: &[u8] = b"cpu_instrs\n\n\
01:ok  02:ok  03:ok  04:ok  05:ok  06:ok  07:ok  08:ok  09:ok  10:ok  11:ok  \n\
\nPassed all tests\n";

fn load_cpu_instrs_rom() -> &'static [u8] {
    CPU_INSTRS_ROM.get_or_init(|| {
        use std::path::PathBuf;

        let candidates = [
            PathBuf::from("assets/roms/gb_tests/blargg/cpu_instrs.gb"),
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("../../assets/roms/gb_tests/blargg/cpu_instrs.gb"),
        ];

        for path in &candidates {
            if let Ok(data) = std::fs::read(path) {
                return data;
            }
        }

        panic!("cpu_instrs.gb not found. Tried: {:?}", candidates)
    })
}

#[test]
fn boot_state_matches_dmg() {
    let cpu = Cpu::new();
    assert_eq!(cpu.regs.af(), 0x01B0);
    assert_eq!(cpu.regs.bc(), 0x0013);
    assert_eq!(cpu.regs.de(), 0x00D8);
    assert_eq!(cpu.regs.hl(), 0x014D);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.regs.pc, 0x0100);
    assert!(!cpu.ime);
}

#[test]
fn nop_advances_pc() {
    let mut cpu = cpu_at(0x0000);
    let mut bus = TestBus::with_program(0x0000, &[0x00]);

    let cycles = step(&mut cpu, &mut bus);

    assert_eq!(cpu.regs.pc, 0x0001);
    assert_eq!(cycles, 4);
}

#[test]
fn ld_16bit_and_basic_ld_indirect_work() {
    // LD BC,0x1234 ; LD (BC),A ; LD A,(BC)
    let mut bus = TestBus::with_program(0x0000, &[0x01, 0x34, 0x12, 0x02, 0x0A]);
    let mut cpu = cpu_at(0x0000);
    cpu.regs.a = 0xAB;

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.bc(), 0x1234);
    assert_eq!(cpu.regs.pc, 0x0003);

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(bus.memory[0x1234], 0xAB);

    cpu.regs.a = 0x00;
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.a, 0xAB);
}

#[test]
fn hl_post_increment_and_decrement_forms() {
    // LD HL,0xC000 ; LD B,0x12 ; LD (HL),B ; LD A,(HL+) ; LD (HL-),A ; LD C,A
    let mut bus = TestBus::with_program(
        0x0000,
        &[0x21, 0x00, 0xC0, 0x06, 0x12, 0x70, 0x2A, 0x32, 0x4F],
    );
    let mut cpu = cpu_at(0x0000);

    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(bus.memory[0xC000], 0x12);

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.a, 0x12);
    assert_eq!(cpu.regs.hl(), 0xC001);

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(bus.memory[0xC001], 0x12);
    assert_eq!(cpu.regs.hl(), 0xC000);

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.c, 0x12);
}

#[test]
fn add_overflow_sets_zero_half_and_carry() {
    // ADD A,0x01 with A=0xFF
    let mut bus = TestBus::with_program(0x0000, &[0xC6, 0x01]);
    let mut cpu = cpu_at(0x0000);
    cpu.regs.a = 0xFF;

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(flags(&cpu), (true, false, true, true));
}

#[test]
fn adc_and_sbc_consume_carry() {
    // ADC A,0x01 ; SBC A,0x0F
    let mut bus = TestBus::with_program(0x0000, &[0xCE, 0x01, 0xDE, 0x0F]);
    let mut cpu = cpu_at(0x0000);
    cpu.regs.a = 0x0E;
    cpu.set_flag(Flag::C, true);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x10);
    assert_eq!(flags(&cpu), (false, false, true, false));

    cpu.set_flag(Flag::C, true);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(flags(&cpu), (true, true, true, false));
}

#[test]
fn sub_underflow_and_cp_leave_expected_flags() {
    // SUB 0x01 ; CP 0xFF
    let mut bus = TestBus::with_program(0x0000, &[0xD6, 0x01, 0xFE, 0xFF]);
    let mut cpu = cpu_at(0x0000);
    cpu.regs.a = 0x00;

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0xFF);
    assert_eq!(flags(&cpu), (false, true, true, true));

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0xFF, "CP must not write A");
    assert_eq!(flags(&cpu), (true, true, false, false));
}

#[test]
fn logic_ops_set_fixed_flags() {
    // AND B ; OR C ; XOR A
    let mut bus = TestBus::with_program(0x0000, &[0xA0, 0xB1, 0xAF]);
    let mut cpu = cpu_at(0x0000);
    cpu.regs.a = 0xF0;
    cpu.regs.b = 0x0F;
    cpu.regs.c = 0x81;

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(flags(&cpu), (true, false, true, false));

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x81);
    assert_eq!(flags(&cpu), (false, false, false, false));

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(flags(&cpu), (true, false, false, false));
}

#[test]
fn inc_dec_8bit_update_flags_and_preserve_c() {
    // INC B ; DEC B ; INC (HL) ; DEC A
    let mut bus = TestBus::with_program(0x0000, &[0x04, 0x05, 0x34, 0x3D]);
    let mut cpu = cpu_at(0x0000);
    cpu.regs.b = 0xFF;
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x0F;
    cpu.regs.a = 0x01;
    cpu.set_flag(Flag::C, true);

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.b, 0x00);
    assert_eq!(flags(&cpu), (true, false, true, true));

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.b, 0xFF);
    assert_eq!(flags(&cpu), (false, true, true, true));

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(bus.memory[0xC000], 0x10);
    assert_eq!(flags(&cpu), (false, false, true, true));

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(flags(&cpu), (true, true, false, true));
}

#[test]
fn add_hl_uses_bit_11_and_15_and_keeps_zero() {
    // ADD HL,BC twice
    let mut bus = TestBus::with_program(0x0000, &[0x09, 0x09]);
    let mut cpu = cpu_at(0x0000);
    cpu.regs.set_hl(0x0FFF);
    cpu.regs.set_bc(0x0001);
    cpu.set_flag(Flag::Z, true);

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.hl(), 0x1000);
    assert_eq!(flags(&cpu), (true, false, true, false));

    cpu.regs.set_hl(0xFFFF);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.hl(), 0x0000);
    assert_eq!(flags(&cpu), (true, false, true, true));
}

#[test]
fn sp_relative_arithmetic_uses_low_byte_flags() {
    // ADD SP,-8 ; LD HL,SP+0x10
    let mut bus = TestBus::with_program(0x0000, &[0xE8, 0xF8, 0xF8, 0x10]);
    let mut cpu = cpu_at(0x0000);
    cpu.regs.sp = 0xFFF8;

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.sp, 0xFFF0);
    assert_eq!(flags(&cpu), (false, false, true, true));

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.hl(), 0x0000);
    assert_eq!(cpu.regs.sp, 0xFFF0);
    assert_eq!(flags(&cpu), (false, false, false, true));
}

#[test]
fn daa_corrects_bcd_addition_and_subtraction() {
    // ADD A,0x38 ; DAA ; ADD A,0x01 ; DAA ; SUB 0x01 ; DAA
    let mut bus = TestBus::with_program(
        0x0000,
        &[0xC6, 0x38, 0x27, 0xC6, 0x17, 0x27, 0xD6, 0x01, 0x27],
    );
    let mut cpu = cpu_at(0x0000);
    cpu.regs.a = 0x45;

    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x83);
    assert!(!cpu.get_flag(Flag::C));

    // 0x83 + 0x17 = 0x9A -> BCD 100.
    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(flags(&cpu), (true, false, false, true));

    // 0x00 - 0x01 = 0xFF with H and C -> BCD 99.
    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x99);
    assert_eq!(flags(&cpu), (false, true, false, true));
}

#[test]
fn cpl_scf_ccf_behaviour() {
    // CPL ; SCF ; CCF
    let mut bus = TestBus::with_program(0x0000, &[0x2F, 0x37, 0x3F]);
    let mut cpu = cpu_at(0x0000);
    cpu.regs.a = 0x5A;
    cpu.regs.f = 0x80;

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0xA5);
    assert_eq!(flags(&cpu), (true, true, true, false));

    step(&mut cpu, &mut bus);
    assert_eq!(flags(&cpu), (true, false, false, true));

    step(&mut cpu, &mut bus);
    assert_eq!(flags(&cpu), (true, false, false, false));
}

#[test]
fn accumulator_rotates_always_clear_zero() {
    // RLCA ; RRA ; RLA
    let mut bus = TestBus::with_program(0x0000, &[0x07, 0x1F, 0x17]);
    let mut cpu = cpu_at(0x0000);
    cpu.regs.a = 0x80;
    cpu.regs.f = 0x00;

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x01);
    assert_eq!(flags(&cpu), (false, false, false, true));

    // 0x01 >> 1 with carry in -> 0x80, carry out 1.
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x80);
    assert!(cpu.get_flag(Flag::C));

    // RLA of 0x80 with C clear gives zero, but Z still reads 0.
    cpu.regs.a = 0x80;
    cpu.set_flag(Flag::C, false);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(flags(&cpu), (false, false, false, true));
}

#[test]
fn cb_prefixed_shifts_and_bits() {
    // SWAP A ; SRL (HL) ; BIT 7,(HL) ; SET 0,B ; RES 0,B ; SRA C
    let mut bus = TestBus::with_program(
        0x0000,
        &[0xCB, 0x37, 0xCB, 0x3E, 0xCB, 0x7E, 0xCB, 0xC0, 0xCB, 0x80, 0xCB, 0x29],
    );
    let mut cpu = cpu_at(0x0000);
    cpu.regs.a = 0xF1;
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x81;
    cpu.regs.c = 0x81;

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.a, 0x1F);
    assert_eq!(flags(&cpu), (false, false, false, false));

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(bus.memory[0xC000], 0x40);
    assert_eq!(flags(&cpu), (false, false, false, true));

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(flags(&cpu), (true, false, true, true));

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.b, 0x01);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.b, 0x00);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.c, 0xC0);
    assert!(cpu.get_flag(Flag::C));
}

#[test]
fn conditional_branches_cost_more_when_taken() {
    // JR NZ,+2 (not taken) ; JR Z,+2 (taken) ; .. ; CALL Z,0x0100 ; RET Z
    let mut bus = TestBus::with_program(0x0000, &[0x20, 0x02, 0x28, 0x02, 0x00, 0x00, 0xCC, 0x00, 0x01]);
    bus.memory[0x0100] = 0xC8; // RET Z
    let mut cpu = cpu_at(0x0000);
    cpu.regs.sp = 0xD000;
    cpu.set_flag(Flag::Z, true);

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.pc, 0x0002);

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0006);

    assert_eq!(step(&mut cpu, &mut bus), 24);
    assert_eq!(cpu.regs.pc, 0x0100);
    assert_eq!(cpu.regs.sp, 0xCFFE);
    assert_eq!(bus.memory[0xCFFE], 0x09);
    assert_eq!(bus.memory[0xCFFF], 0x00);

    assert_eq!(step(&mut cpu, &mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x0009);
    assert_eq!(cpu.regs.sp, 0xD000);
}

#[test]
fn jr_negative_offset_loops_in_place() {
    let mut bus = TestBus::with_program(0x0150, &[0x18, 0xFE]);
    let mut cpu = cpu_at(0x0150);

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0150);
}

#[test]
fn push_pop_af_masks_low_nibble() {
    // LD BC,0x12FF ; PUSH BC ; POP AF ; PUSH AF ; POP DE
    let mut bus = TestBus::with_program(0x0000, &[0x01, 0xFF, 0x12, 0xC5, 0xF1, 0xF5, 0xD1]);
    let mut cpu = cpu_at(0x0000);
    cpu.regs.sp = 0xD000;

    step(&mut cpu, &mut bus);
    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.a, 0x12);
    assert_eq!(cpu.regs.f, 0xF0);

    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.de(), 0x12F0);
    assert_eq!(cpu.regs.sp, 0xD000);
}

#[test]
fn rst_pushes_return_address() {
    let mut bus = TestBus::with_program(0x0200, &[0xEF]);
    let mut cpu = cpu_at(0x0200);
    cpu.regs.sp = 0xD000;

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x0028);
    assert_eq!(bus.memory[0xCFFE], 0x01);
    assert_eq!(bus.memory[0xCFFF], 0x02);
}

#[test]
fn interrupt_dispatch_pushes_pc_and_clears_request() {
    let mut bus = TestBus::with_program(0x0200, &[0x00]);
    let mut cpu = cpu_at(0x0200);
    cpu.regs.sp = 0xD000;
    cpu.ime = true;
    bus.memory[0xFFFF] = 0x05;
    bus.memory[0xFF0F] = 0x04;

    assert_eq!(step(&mut cpu, &mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x0050);
    assert!(!cpu.ime);
    assert_eq!(bus.memory[0xFF0F], 0x00);
    assert_eq!(bus.memory[0xCFFE], 0x00);
    assert_eq!(bus.memory[0xCFFF], 0x02);
}

#[test]
fn simultaneous_interrupts_dispatch_in_priority_order() {
    let mut bus = TestBus::default();
    let mut cpu = cpu_at(0x0200);
    cpu.regs.sp = 0xD000;
    cpu.ime = true;
    bus.memory[0xFFFF] = 0x1F;
    bus.memory[0xFF0F] = 0x1E;

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.pc, 0x0048);
    assert_eq!(bus.memory[0xFF0F], 0x1C);
}

#[test]
fn disabled_interrupts_are_not_dispatched() {
    let mut bus = TestBus::with_program(0x0200, &[0x00]);
    let mut cpu = cpu_at(0x0200);
    cpu.ime = true;
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x04;

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0201);
    assert_eq!(bus.memory[0xFF0F], 0x04);
}

#[test]
fn ei_takes_effect_after_following_instruction() {
    // EI ; NOP ; NOP
    let mut bus = TestBus::with_program(0x0200, &[0xFB, 0x00, 0x00]);
    let mut cpu = cpu_at(0x0200);
    cpu.regs.sp = 0xD000;
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x01;

    step(&mut cpu, &mut bus);
    assert!(!cpu.ime);
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0202);
    assert!(cpu.ime);

    assert_eq!(step(&mut cpu, &mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x0040);
}

#[test]
fn di_cancels_pending_ei() {
    // EI ; DI ; NOP
    let mut bus = TestBus::with_program(0x0200, &[0xFB, 0xF3, 0x00]);
    let mut cpu = cpu_at(0x0200);
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x01;

    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert!(!cpu.ime);
    assert_eq!(cpu.regs.pc, 0x0203);
}

#[test]
fn halt_waits_then_resumes_without_ime() {
    // HALT ; INC A
    let mut bus = TestBus::with_program(0x0200, &[0x76, 0x3C]);
    let mut cpu = cpu_at(0x0200);
    cpu.regs.a = 0x00;
    bus.memory[0xFFFF] = 0x04;

    step(&mut cpu, &mut bus);
    assert!(cpu.halted);
    for _ in 0..3 {
        assert_eq!(step(&mut cpu, &mut bus), 4);
        assert_eq!(cpu.regs.pc, 0x0201);
    }

    bus.memory[0xFF0F] = 0x04;
    step(&mut cpu, &mut bus);
    assert!(!cpu.halted);
    assert_eq!(cpu.regs.a, 0x01);
    assert_eq!(cpu.regs.pc, 0x0202);
    assert_eq!(bus.memory[0xFF0F], 0x04, "no dispatch with IME clear");
}

#[test]
fn halt_bug_repeats_next_byte() {
    // HALT ; INC A with an interrupt already pending and IME clear.
    let mut bus = TestBus::with_program(0x0200, &[0x76, 0x3C, 0x00]);
    let mut cpu = cpu_at(0x0200);
    cpu.regs.a = 0x00;
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x01;

    step(&mut cpu, &mut bus);
    assert!(!cpu.halted);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.pc, 0x0201);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.pc, 0x0202);
    assert_eq!(cpu.regs.a, 0x02);
}

#[test]
fn stop_idles_until_joypad_line_goes_low() {
    let mut bus = TestBus::with_program(0x0200, &[0x10, 0x00, 0x3C]);
    let mut cpu = cpu_at(0x0200);
    cpu.regs.a = 0x00;
    bus.memory[0xFF00] = 0xCF;

    step(&mut cpu, &mut bus);
    assert!(cpu.is_stopped());
    assert_eq!(cpu.regs.pc, 0x0202);

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert!(cpu.is_stopped());

    bus.memory[0xFF00] = 0xCE;
    step(&mut cpu, &mut bus);
    assert!(!cpu.is_stopped());
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x01);
}

#[test]
fn undefined_opcode_locks_the_core() {
    let mut bus = TestBus::with_program(0x0200, &[0x00, 0xDD]);
    let mut cpu = cpu_at(0x0200);

    assert_eq!(cpu.step(&mut bus), Ok(4));
    let expected = EmulationError::InvalidInstruction {
        opcode: 0xDD,
        pc: 0x0201,
    };
    assert_eq!(cpu.step(&mut bus), Err(expected));
    assert!(cpu.is_locked());
    assert_eq!(cpu.step(&mut bus), Err(expected));
    assert_eq!(cpu.regs.pc, 0x0202);

    cpu.reset();
    assert!(!cpu.is_locked());
    assert_eq!(cpu.regs.pc, 0x0100);
}

/// Run `opcode` once from a fixed scratch state with F preset to `f`.
fn run_single(opcode: u8, cb: Option<u8>, f: u8) -> (Cpu, Cpu, Result<u32, EmulationError>) {
    let program = match cb {
        Some(cb) => vec![opcode, cb],
        None => vec![opcode, 0x00, 0x00],
    };
    let mut bus = TestBus::with_program(0x0200, &program);
    let mut cpu = cpu_at(0x0200);
    cpu.regs.sp = 0xD000;
    cpu.regs.set_hl(0xC100);
    cpu.regs.f = f;
    let before = cpu.clone();
    let result = cpu.step(&mut bus);
    (before, cpu, result)
}

fn changes_pc(info: &OpcodeInfo) -> bool {
    ["JR", "JP", "CALL", "RET", "RST"]
        .iter()
        .any(|prefix| info.mnemonic.starts_with(prefix))
}

#[test]
fn executed_cycles_and_lengths_match_opcode_table() {
    for opcode in 0..=0xFFu8 {
        let info = &OPCODES[opcode as usize];
        if opcode == 0xCB {
            continue;
        }

        let (_, cpu, result) = run_single(opcode, None, 0x00);
        if !info.is_defined() {
            assert!(result.is_err(), "{opcode:#04x} should be rejected");
            continue;
        }
        assert_eq!(
            info.length,
            1 + info.operand.width(),
            "{opcode:#04x} {}",
            info.mnemonic
        );

        if info.is_conditional() {
            // cc field: NZ and NC are taken when F=0, Z and C when F=0xF0.
            let taken_when_clear = (opcode >> 3) & 0x01 == 0;
            let (_, _, set_result) = run_single(opcode, None, 0xF0);
            let (clear_cost, set_cost) = if taken_when_clear {
                (info.cycles_taken, info.cycles)
            } else {
                (info.cycles, info.cycles_taken)
            };
            assert_eq!(result, Ok(clear_cost as u32), "{}", info.mnemonic);
            assert_eq!(set_result, Ok(set_cost as u32), "{}", info.mnemonic);
        } else {
            assert_eq!(result, Ok(info.cycles as u32), "{}", info.mnemonic);
        }

        if !changes_pc(info) {
            assert_eq!(
                cpu.regs.pc,
                0x0200 + info.length as u16,
                "{}",
                info.mnemonic
            );
        }
    }
}

#[test]
fn cb_cycles_match_table() {
    for cb in 0..=0xFFu8 {
        let (_, cpu, result) = run_single(0xCB, Some(cb), 0x00);
        assert_eq!(result, Ok(cb_cycles(cb)), "CB {cb:#04x}");
        assert_eq!(cpu.regs.pc, 0x0202);
    }
}

fn check_flag_rule(label: &str, rule: &str, before: &Cpu, after: &Cpu) {
    for (index, flag) in Flag::ALL.into_iter().enumerate() {
        let effect = match rule.as_bytes()[index] {
            b'-' => FlagEffect::Unaffected,
            b'0' => FlagEffect::Reset,
            b'1' => FlagEffect::Set,
            _ => FlagEffect::Computed,
        };
        match effect {
            FlagEffect::Unaffected => assert_eq!(
                after.get_flag(flag),
                before.get_flag(flag),
                "{label}: {flag:?} should be unaffected"
            ),
            FlagEffect::Reset => assert!(!after.get_flag(flag), "{label}: {flag:?} should be 0"),
            FlagEffect::Set => assert!(after.get_flag(flag), "{label}: {flag:?} should be 1"),
            FlagEffect::Computed => {}
        }
    }
}

#[test]
fn flag_effects_match_opcode_table() {
    for opcode in 0..=0xFFu8 {
        let info = &OPCODES[opcode as usize];
        if !info.is_defined() || opcode == 0xCB {
            continue;
        }
        for f in [0x00, 0xF0] {
            let (before, after, _) = run_single(opcode, None, f);
            check_flag_rule(info.mnemonic, info.flags, &before, &after);
            assert_eq!(after.regs.f & 0x0F, 0);
        }
    }
    for cb in 0..=0xFFu8 {
        for f in [0x00, 0xF0] {
            let (before, after, _) = run_single(0xCB, Some(cb), f);
            check_flag_rule(&format!("CB {cb:#04x}"), cb_flags(cb), &before, &after);
        }
    }
}

#[test]
fn opcode_table_describes_flag_rules() {
    let add = &OPCODES[0x80];
    assert_eq!(add.mnemonic, "ADD A,B");
    assert_eq!(add.flag_effect(Flag::Z), FlagEffect::Computed);
    assert_eq!(add.flag_effect(Flag::N), FlagEffect::Reset);

    let cpl = &OPCODES[0x2F];
    assert_eq!(cpl.flag_effect(Flag::Z), FlagEffect::Unaffected);
    assert_eq!(cpl.flag_effect(Flag::H), FlagEffect::Set);

    let undefined = OPCODES.iter().filter(|info| !info.is_defined()).count();
    assert_eq!(undefined, 11);
}

/// Run blargg's cpu_instrs.gb until it prints its summary over serial.
///
/// Ignored by default: it needs the ROM on disk and takes a while in
/// debug builds.
#[test]
#[ignore]
fn run_blargg_cpu_instrs() {
    const MAX_FRAMES: u32 = 60 * 120;

    let rom = load_cpu_instrs_rom();
    let mut gb = GameBoy::new();
    gb.load_rom(rom).expect("cpu_instrs.gb should load");

    for _ in 0..MAX_FRAMES {
        gb.run_frame().expect("cpu_instrs.gb only uses defined opcodes");
        if gb.serial_output().len() >= CPU_SERIAL_EXPECT.len() {
            break;
        }
    }

    let output = gb.serial_output();
    assert_eq!(
        output,
        CPU_SERIAL_EXPECT,
        "serial output mismatch:\n{}",
        String::from_utf8_lossy(output)
    );
}
